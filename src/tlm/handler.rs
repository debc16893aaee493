use log::debug;

use crate::error::HandlerError;
use super::protocol::LineId;

/// Capability through which an endpoint drives interrupt lines.
///
/// The handler is the authority on which line ids exist; endpoints ask
/// [`recognizes`](InterruptHandler::recognizes) instead of keeping their own
/// table.
pub trait InterruptHandler {
    fn recognizes(&self, line: LineId) -> bool;
    fn assert(&mut self, line: LineId, level: u32) -> Result<(), HandlerError>;
    fn clear(&mut self, line: LineId) -> Result<(), HandlerError>;
    fn status(&self, line: LineId) -> Result<u32, HandlerError>;
}

impl<H: InterruptHandler + ?Sized> InterruptHandler for &mut H {
    fn recognizes(&self, line: LineId) -> bool {
        (**self).recognizes(line)
    }
    fn assert(&mut self, line: LineId, level: u32) -> Result<(), HandlerError> {
        (**self).assert(line, level)
    }
    fn clear(&mut self, line: LineId) -> Result<(), HandlerError> {
        (**self).clear(line)
    }
    fn status(&self, line: LineId) -> Result<u32, HandlerError> {
        (**self).status(line)
    }
}

impl<H: InterruptHandler + ?Sized> InterruptHandler for Box<H> {
    fn recognizes(&self, line: LineId) -> bool {
        (**self).recognizes(line)
    }
    fn assert(&mut self, line: LineId, level: u32) -> Result<(), HandlerError> {
        (**self).assert(line, level)
    }
    fn clear(&mut self, line: LineId) -> Result<(), HandlerError> {
        (**self).clear(line)
    }
    fn status(&self, line: LineId) -> Result<u32, HandlerError> {
        (**self).status(line)
    }
}

#[derive(Default, Clone, Copy, Debug)]
struct Line {
    level: u32,     // 0 = not pending
    masked: bool,
}

/// A flat table of level-sensitive interrupt lines `0..n`.
#[derive(Clone, Debug)]
pub struct InterruptLines {
    lines: Vec<Line>,
}

impl InterruptLines {
    pub fn new(n: usize) -> Self {
        Self { lines: vec![Line::default(); n] }
    }

    // helper functions

    fn line(&self, id: LineId) -> Result<&Line, HandlerError> {
        self.lines.get(id as usize).ok_or(HandlerError::UnknownLine(id))
    }
    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, HandlerError> {
        self.lines.get_mut(id as usize).ok_or(HandlerError::UnknownLine(id))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    pub fn mask(&mut self, id: LineId) -> Result<(), HandlerError> {
        self.line_mut(id)?.masked = true;
        Ok(())
    }
    pub fn unmask(&mut self, id: LineId) -> Result<(), HandlerError> {
        self.line_mut(id)?.masked = false;
        Ok(())
    }
    /// ids of all lines currently asserted, lowest first
    pub fn pending(&self) -> Vec<LineId> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.level != 0)
            .map(|(i, _)| i as LineId)
            .collect()
    }
}

impl InterruptHandler for InterruptLines {
    fn recognizes(&self, line: LineId) -> bool {
        (line as usize) < self.lines.len()
    }
    fn assert(&mut self, id: LineId, level: u32) -> Result<(), HandlerError> {
        let line = self.line_mut(id)?;
        if line.masked {
            return Err(HandlerError::NotPermitted { line: id, reason: "line is masked" });
        }
        if level == 0 {
            return Err(HandlerError::NotPermitted { line: id, reason: "cannot assert level 0" });
        }
        line.level = level;
        debug!("line {} asserted at level {}", id, level);
        Ok(())
    }
    fn clear(&mut self, id: LineId) -> Result<(), HandlerError> {
        self.line_mut(id)?.level = 0;
        debug!("line {} cleared", id);
        Ok(())
    }
    fn status(&self, id: LineId) -> Result<u32, HandlerError> {
        Ok(self.line(id)?.level)
    }
}

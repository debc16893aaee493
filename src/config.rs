use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be non-zero")]
    Zero(&'static str),

    #[error("{0} overflows")]
    Overflow(&'static str),

    #[error("cache size {cache_size} is not a multiple of block_size * cache_assoc ({set_bytes})")]
    Geometry { cache_size: u32, set_bytes: u32 },
}

#[derive(Clone, Debug)]
pub struct SimConfig {             // unit         reasonable defaults
    pub irq_lines: u32,            // lines        8
    pub irq_period: u32,           // cycles       16
    pub cycles: u64,               // cycles       1000
    pub word_size: u32,            // bytes        4
    pub block_size: u32,           // bytes        32
    pub cache_size: u32,           // bytes        4096
    pub cache_assoc: u32,          // blocks       2
    pub trace_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            irq_lines: 8,
            irq_period: 16,
            cycles: 1000,
            word_size: 4,
            block_size: 32,
            cache_size: 4096,
            cache_assoc: 2,
            trace_path: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nonzero = [
            ("irq_lines", self.irq_lines),
            ("irq_period", self.irq_period),
            ("word_size", self.word_size),
            ("block_size", self.block_size),
            ("cache_size", self.cache_size),
            ("cache_assoc", self.cache_assoc),
        ];
        if let Some(&(name, _)) = nonzero.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Zero(name));
        }
        let set_bytes = self.set_bytes().ok_or(ConfigError::Overflow("block_size * cache_assoc"))?;
        if self.cache_size % set_bytes != 0 {
            return Err(ConfigError::Geometry { cache_size: self.cache_size, set_bytes });
        }
        Ok(())
    }

    /// bytes covered by one set, `None` if that does not fit in a `u32`
    pub fn set_bytes(&self) -> Option<u32> {
        self.block_size.checked_mul(self.cache_assoc)
    }

    /// number of sets in the traced cache; 0 for geometry that fails `validate`
    pub fn num_sets(&self) -> u32 {
        match self.set_bytes() {
            Some(b) if b != 0 => self.cache_size / b,
            _ => 0,
        }
    }

    /// get cache index and tag of an address under this geometry
    pub fn pos(&self, addr: u32) -> (u32, u32) {
        let block = addr / self.block_size;
        let index = block % self.num_sets();
        let tag = block / self.num_sets();
        (index, tag)
    }
}

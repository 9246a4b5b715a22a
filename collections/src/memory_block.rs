use core::fmt;

/// A contiguous range of simulated memory, `length` words starting at
/// `base_address`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemoryBlock {
    pub base_address: usize,
    pub length: usize,
}

impl MemoryBlock {
    pub fn new(base_address: usize, length: usize) -> Self {
        Self {
            base_address,
            length,
        }
    }

    /// One past the last address, or `None` if the block runs off the end of
    /// the address space.
    pub fn end_address(&self) -> Option<usize> {
        self.base_address.checked_add(self.length)
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} , {})", self.base_address, self.length)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::MemoryBlock;
    use std::string::ToString;

    #[test]
    fn should_render_base_and_length() {
        assert_eq!(MemoryBlock::new(20, 5).to_string(), "(20 , 5)");
    }

    #[test]
    fn should_compute_end_address() {
        assert_eq!(MemoryBlock::new(20, 5).end_address(), Some(25));
    }

    #[test]
    fn should_not_compute_end_address_past_usize_max() {
        assert_eq!(MemoryBlock::new(usize::MAX - 4, 4).end_address(), Some(usize::MAX));
        assert_eq!(MemoryBlock::new(usize::MAX - 4, 5).end_address(), None);
    }
}

//! Input permission port interface

/// Port for checking whether the process may simulate keyboard input
pub trait InputPermission: Send + Sync {
    fn is_granted(&self) -> bool;
}

impl InputPermission for Box<dyn InputPermission> {
    fn is_granted(&self) -> bool {
        self.as_ref().is_granted()
    }
}

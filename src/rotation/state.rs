#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RotationState {
    Uninitialized, // Waiting for the catalog
    Seeding,       // Choosing the first working set
    Steady,        // Replacing expired images as they leave
    TornDown,      // View is gone, every timer cancelled
}

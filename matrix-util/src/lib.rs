pub mod common_io; // gzip-aware readers and writers
pub mod ndarray_io; // labelled delimited tables
pub mod ndarray_util; // square-matrix checks and sampling
pub mod traits;
pub mod utils; // row partitioning

pub mod adjacency; // soft-thresholded adjacency
pub mod correlation; // Pearson correlation between genes
pub mod dissimilarity; // 1 - TOM
pub mod network_common;
pub mod network_io; // gene x gene tables
pub mod progress; // row progress of the TOM workers
pub mod tom; // topological overlap

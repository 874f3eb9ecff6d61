pub mod paths;

pub use paths::AurelionPaths;

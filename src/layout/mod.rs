/// Absolute placement of header, grid and footer elements.
pub mod resolver;

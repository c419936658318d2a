/// Bitset of cell indices used as a visited set
pub mod bitset;
/// Connected same-type components of a mesh
pub mod clusters;
/// Lazy enumeration of self-avoiding walks
pub mod walks;

//! The AVL balance engine and the map/set types built on it.

pub mod balance;
pub mod map;
pub mod node;
pub mod set;

pub use balance::{assert_avl, insert, print, remove, InvariantError};
pub use map::AvlMap;
pub use node::AvlNode;
pub use set::AvlSet;

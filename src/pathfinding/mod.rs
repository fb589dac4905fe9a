mod flow;

pub use flow::{PathFinder, PathTable};

pub mod prelude {
    pub use crate::pathfinding::flow::*;
}

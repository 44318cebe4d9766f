pub mod environment;
pub mod frame;
pub mod native;
pub mod value;

pub mod prelude {
    pub use super::{
        environment::*,
        frame::*,
        native::*,
        value::*
    };
}

#[cfg(test)]
mod tests;

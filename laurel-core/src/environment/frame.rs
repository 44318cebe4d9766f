use std::rc::Rc;

use crate::utils::prelude::SrcSpan;

pub const PROGRAM_FRAME: &str = "<program>";

/// Entry in the call chain, kept only for tracebacks.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFrame {
    pub name: String,
    pub parent: Option<Rc<CallFrame>>,
    /// Span of the call expression in the parent frame.
    pub entry: Option<SrcSpan>,
}

impl CallFrame {
    pub fn program() -> Rc<Self> {
        Rc::new(Self {
            name: PROGRAM_FRAME.to_string(),
            parent: None,
            entry: None
        })
    }

    pub fn call(name: &str, parent: Rc<CallFrame>, entry: SrcSpan) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            parent: Some(parent),
            entry: Some(entry)
        })
    }

    /// Frames from the outermost to this one.
    pub fn chain(self: &Rc<Self>) -> Vec<Rc<CallFrame>> {
        let mut frames = vec![];
        let mut current = Some(self.clone());

        while let Some(frame) = current {
            current = frame.parent.clone();
            frames.push(frame);
        }

        frames.reverse();
        frames
    }
}

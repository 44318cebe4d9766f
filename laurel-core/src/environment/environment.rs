use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::{NativeFunction, Value, FALSE, NULL, TRUE};

/// One lexical scope. Lookups walk outward through `parent`; assignments
/// always land in the scope they are made in.
#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            parent: None
        }
    }

    /// Fresh scope nested inside `parent`.
    pub fn child(parent: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            parent: Some(parent)
        }))
    }

    /// Root scope holding the constants and built-in functions.
    pub fn global() -> Rc<RefCell<Self>> {
        let mut env = Self::new();

        env.set("null", NULL);
        env.set("false", FALSE);
        env.set("true", TRUE);

        for native in NativeFunction::ALL {
            env.set(native.name(), Value::Native(native));
        }

        Rc::new(RefCell::new(env))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.parent {
                Some(parent) => parent.borrow().get(name),
                None => None,
            },
        }
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.store.insert(name.to_string(), value);
    }
}

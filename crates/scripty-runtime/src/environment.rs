//! Lexical environments
//!
//! Frames live in an arena and are addressed by [`EnvId`]. A child frame only
//! points at its parent, and frames are created and destroyed in stack order: the
//! block or call that pushed a frame pops it before anything below it is popped.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::FuncDecl;
use crate::value::Value;

/// Handle to a frame in [`Environments`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(usize);

impl EnvId {
    /// The global frame, always present
    pub const GLOBAL: EnvId = EnvId(0);
}

/// State of a variable slot
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Declared with `local x` and not yet assigned
    Uninitialized,
    Value(Value),
}

/// A declared function together with the environment it was declared in
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub decl: Rc<FuncDecl>,
    pub env: EnvId,
}

#[derive(Debug, Default)]
struct Frame {
    vars: HashMap<String, Binding>,
    funcs: HashMap<String, FunctionEntry>,
    parent: Option<EnvId>,
}

/// Arena of scope frames
#[derive(Debug)]
pub struct Environments {
    frames: Vec<Frame>,
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}

impl Environments {
    /// Create an arena holding only the global frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Number of live frames (including the global frame)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Push a new frame whose parent is `parent`
    pub fn push(&mut self, parent: EnvId) -> EnvId {
        debug_assert!(parent.0 < self.frames.len(), "parent frame is not live");
        let id = EnvId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(parent),
            ..Frame::default()
        });
        tracing::trace!(env = id.0, parent = parent.0, "push scope");
        id
    }

    /// Pop the topmost frame, which must be `id`
    pub fn pop(&mut self, id: EnvId) {
        debug_assert_eq!(id.0 + 1, self.frames.len(), "popped frame is not on top");
        debug_assert_ne!(id, EnvId::GLOBAL, "cannot pop the global frame");
        if id != EnvId::GLOBAL {
            self.frames.truncate(id.0);
        }
        tracing::trace!(env = id.0, "pop scope");
    }

    /// Drop every frame above the global one
    pub fn reset_to_global(&mut self) {
        self.frames.truncate(1);
    }

    /// Find the nearest binding of `name`, walking parent links
    pub fn get(&self, env: EnvId, name: &str) -> Option<&Binding> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = &self.frames[id.0];
            if let Some(binding) = frame.vars.get(name) {
                return Some(binding);
            }
            current = frame.parent;
        }
        None
    }

    /// Bind `name` in `env` itself, shadowing outer bindings
    pub fn define(&mut self, env: EnvId, name: impl Into<String>, binding: Binding) {
        self.frames[env.0].vars.insert(name.into(), binding);
    }

    /// Rewrite the nearest binding of `name`, or create it in the global frame
    pub fn assign(&mut self, env: EnvId, name: &str, value: Value) {
        let target = self.resolve_frame(env, name).unwrap_or(EnvId::GLOBAL);
        self.frames[target.0]
            .vars
            .insert(name.to_string(), Binding::Value(value));
    }

    /// Register a function in `env`
    pub fn define_function(&mut self, env: EnvId, decl: Rc<FuncDecl>) {
        let name = decl.name.name.clone();
        self.frames[env.0]
            .funcs
            .insert(name, FunctionEntry { decl, env });
    }

    /// Find the nearest function named `name`, walking parent links
    pub fn get_function(&self, env: EnvId, name: &str) -> Option<FunctionEntry> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = &self.frames[id.0];
            if let Some(entry) = frame.funcs.get(name) {
                return Some(entry.clone());
            }
            current = frame.parent;
        }
        None
    }

    fn resolve_frame(&self, env: EnvId, name: &str) -> Option<EnvId> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = &self.frames[id.0];
            if frame.vars.contains_key(name) {
                return Some(id);
            }
            current = frame.parent;
        }
        None
    }
}

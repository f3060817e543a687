//! Command registry
//!
//! An ordered, fixed-capacity list of `(name, handler)` bindings owned by
//! the session. Later registrations shadow earlier ones with the same name.

use core::fmt;

use heapless::Vec;

use super::args::Args;
use super::session::Reply;
use crate::config::MAX_COMMANDS;

/// A command handler
///
/// `Ctx` is the application state handed to [`super::session::Session::poll`];
/// handlers reach the radio, the log, or anything else through it.
pub trait Command<Ctx> {
    /// Run the command
    ///
    /// `reply` writes back to the peer that sent the line. `args` borrows
    /// the line buffer and is only valid for this call.
    fn execute(&self, ctx: &mut Ctx, reply: &mut dyn Reply, args: &Args<'_>);
}

impl<Ctx, F> Command<Ctx> for F
where
    F: Fn(&mut Ctx, &mut dyn Reply, &Args<'_>),
{
    fn execute(&self, ctx: &mut Ctx, reply: &mut dyn Reply, args: &Args<'_>) {
        self(ctx, reply, args);
    }
}

/// One name bound to one handler
pub struct Binding<'a, Ctx> {
    name: &'a str,
    handler: &'a dyn Command<Ctx>,
}

impl<'a, Ctx> Binding<'a, Ctx> {
    /// Command name
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Bound handler
    #[must_use]
    pub fn handler(&self) -> &'a dyn Command<Ctx> {
        self.handler
    }
}

/// Returned when the registry has no free slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryFull;

impl fmt::Display for RegistryFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command registry full")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryFull {}

#[cfg(feature = "embedded")]
impl defmt::Format for RegistryFull {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RegistryFull");
    }
}

/// Ordered set of command bindings
///
/// Bindings are stored oldest first and searched newest first.
pub struct Registry<'a, Ctx, const N: usize = MAX_COMMANDS> {
    bindings: Vec<Binding<'a, Ctx>, N>,
}

impl<'a, Ctx, const N: usize> Registry<'a, Ctx, N> {
    /// Create an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `name` to `handler`, shadowing any earlier binding of `name`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryFull`] if all `N` slots are taken.
    pub fn register(&mut self, name: &'a str, handler: &'a dyn Command<Ctx>) -> Result<(), RegistryFull> {
        self.bindings
            .push(Binding { name, handler })
            .map_err(|_| RegistryFull)
    }

    /// Find the most recently registered handler for `name`
    ///
    /// Matching is exact and case-sensitive on the whole token.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a dyn Command<Ctx>> {
        self.iter().find(|b| b.name == name).map(|b| b.handler)
    }

    /// Iterate over bindings, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Binding<'a, Ctx>> + '_ {
        self.bindings.iter().rev()
    }

    /// Number of bindings (shadowed ones included)
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<Ctx, const N: usize> Default for Registry<'_, Ctx, N> {
    fn default() -> Self {
        Self::new()
    }
}

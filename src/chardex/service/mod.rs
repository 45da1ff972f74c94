//! # State Distribution Layer
//!
//! Two independent, injectable services (favorites and notes), each
//! owning one piece of state. Mutations funnel through a closed set of
//! actions and a pure transition function `(state, action) -> state`;
//! repository side effects stay outside the transition, invoked by the
//! orchestrating service methods. Consumers subscribe through a `watch`
//! channel and all observe the same state value; the reducer is the only
//! writer path.
//!
//! The two services deliberately differ in when they persist:
//! favorites are optimistic (reduce first, best-effort write after),
//! notes are validated-then-committed (repository first, dispatch only on
//! success, so a validation failure never touches in-memory state).

pub mod favorites;
pub mod notes;

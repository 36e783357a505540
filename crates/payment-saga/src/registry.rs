use std::fmt::{Debug, Display};

use crate::step::{FnStep, SagaStep};

/// A type-erased step stored in a [`StepRegistry`].
pub type BoxedStep<Id, Data, Ctx, Err, CErr = Err> = Box<
    dyn SagaStep<Id = Id, Data = Data, Context = Ctx, Error = Err, CompensationError = CErr>,
>;

/// Ordered table of steps consumed by [`run`](crate::run).
///
/// Order is fixed by the order in which steps are added and never changes
/// afterwards. A registry holds no per-run state, so one registry can serve
/// any number of runs, including concurrent ones.
///
/// `CErr` is the error type of compensations and defaults to the step error
/// type.
pub struct StepRegistry<Id, Data, Ctx, Err, CErr = Err> {
    steps: Vec<BoxedStep<Id, Data, Ctx, Err, CErr>>,
}

impl<Id, Data, Ctx, Err, CErr> StepRegistry<Id, Data, Ctx, Err, CErr>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    #[must_use]
    pub fn with_step<S>(mut self, step: S) -> Self
    where
        S: SagaStep<Id = Id, Data = Data, Context = Ctx, Error = Err, CompensationError = CErr>
            + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Append a step built from an execute function and its compensation.
    #[must_use]
    pub fn with_fn<F, C>(self, id: Id, execute: F, compensate: C) -> Self
    where
        Ctx: 'static,
        Err: 'static,
        CErr: 'static,
        F: Fn(&Ctx, Data) -> Result<Data, Err> + Send + Sync + 'static,
        C: Fn(&Ctx, &Data, &Err) -> Result<(), CErr> + Send + Sync + 'static,
    {
        self.with_step(FnStep::new(id, execute, compensate))
    }

    /// Step tags in execution order.
    #[must_use]
    pub fn ids(&self) -> Vec<Id> {
        self.steps.iter().map(|step| step.id()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxedStep<Id, Data, Ctx, Err, CErr>> {
        self.steps.iter()
    }
}

impl<Id, Data, Ctx, Err, CErr> Default for StepRegistry<Id, Data, Ctx, Err, CErr>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, Data, Ctx, Err, CErr> Debug for StepRegistry<Id, Data, Ctx, Err, CErr>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("steps", &self.ids())
            .finish()
    }
}

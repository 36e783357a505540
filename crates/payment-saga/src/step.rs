use std::fmt::{Debug, Display};
use std::marker::PhantomData;

/// A step in a saga that can be executed and compensated.
///
/// Every step of a registry receives the same record type by value and hands
/// it on to the next step. The record a step returns is kept as a snapshot
/// and handed back to [`compensate`](SagaStep::compensate) if a later step
/// fails.
///
/// # Type Parameters
///
/// - `Id`: Tag naming the step in execution history and errors
/// - `Data`: The record flowing from step to step
/// - `Context`: Shared dependencies (injected, not passed between steps)
/// - `Error`: The failure reason for step failures
/// - `CompensationError`: Why a compensation could not undo the step
pub trait SagaStep: Send + Sync {
    /// Tag naming this step.
    type Id: Copy + Eq + Debug + Display + Send + Sync + 'static;

    /// Record received from the previous step and produced for the next one.
    type Data: Clone + Send + 'static;

    /// Shared context providing dependencies.
    type Context;

    /// Error type for step failures.
    type Error;

    /// Error type for failed compensations.
    type CompensationError;

    /// Tag used for execution history, logging and error messages.
    fn id(&self) -> Self::Id;

    /// Execute the step, producing the record for the next step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails to complete.
    fn execute(&self, ctx: &Self::Context, data: Self::Data) -> Result<Self::Data, Self::Error>;

    /// Compensate (undo) the step's effects.
    ///
    /// Called during rollback when a later step fails. Receives the record as
    /// this step produced it and the reason of the failure that triggered
    /// the rollback.
    ///
    /// The default implementation is a no-op, suitable for read-only steps.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    fn compensate(
        &self,
        ctx: &Self::Context,
        data: &Self::Data,
        reason: &Self::Error,
    ) -> Result<(), Self::CompensationError> {
        let _ = (ctx, data, reason);
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.id())
    }
}

/// A step assembled from a pair of plain functions.
///
/// `execute` is the forward work, `compensate` the paired undo action.
pub struct FnStep<Id, Data, Ctx, Err, CErr, F, C> {
    id: Id,
    description: Option<String>,
    execute: F,
    compensate: C,
    _marker: PhantomData<fn(&Ctx, Data, &Err) -> Result<(), CErr>>,
}

impl<Id, Data, Ctx, Err, CErr, F, C> FnStep<Id, Data, Ctx, Err, CErr, F, C>
where
    F: Fn(&Ctx, Data) -> Result<Data, Err>,
    C: Fn(&Ctx, &Data, &Err) -> Result<(), CErr>,
{
    #[must_use]
    pub fn new(id: Id, execute: F, compensate: C) -> Self {
        Self {
            id,
            description: None,
            execute,
            compensate,
            _marker: PhantomData,
        }
    }

    /// Override the default `undo <id>` compensation description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<Id, Data, Ctx, Err, CErr, F, C> SagaStep for FnStep<Id, Data, Ctx, Err, CErr, F, C>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
    F: Fn(&Ctx, Data) -> Result<Data, Err> + Send + Sync,
    C: Fn(&Ctx, &Data, &Err) -> Result<(), CErr> + Send + Sync,
{
    type Id = Id;
    type Data = Data;
    type Context = Ctx;
    type Error = Err;
    type CompensationError = CErr;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn execute(&self, ctx: &Self::Context, data: Self::Data) -> Result<Self::Data, Self::Error> {
        (self.execute)(ctx, data)
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        data: &Self::Data,
        reason: &Self::Error,
    ) -> Result<(), Self::CompensationError> {
        (self.compensate)(ctx, data, reason)
    }

    fn compensation_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("undo {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct TestContext {
        log: RefCell<Vec<String>>,
    }

    #[derive(Debug, PartialEq)]
    struct TestError(&'static str);

    struct ReadOnlyStep;

    impl SagaStep for ReadOnlyStep {
        type Id = &'static str;
        type Data = i32;
        type Context = TestContext;
        type Error = TestError;
        type CompensationError = TestError;

        fn id(&self) -> Self::Id {
            "read_only"
        }

        fn execute(
            &self,
            _ctx: &Self::Context,
            data: Self::Data,
        ) -> Result<Self::Data, Self::Error> {
            Ok(data)
        }
    }

    #[test]
    fn default_compensation_is_no_op() {
        let ctx = TestContext {
            log: RefCell::new(Vec::new()),
        };

        let result = ReadOnlyStep.compensate(&ctx, &1, &TestError("later failure"));

        assert_eq!(result, Ok(()));
        assert!(ctx.log.borrow().is_empty());
    }

    #[test]
    fn default_compensation_description_names_step() {
        assert_eq!(ReadOnlyStep.compensation_description(), "undo read_only");
    }

    #[test]
    fn fn_step_delegates_to_closures() {
        let ctx = TestContext {
            log: RefCell::new(Vec::new()),
        };
        let step = FnStep::new(
            "double",
            |_ctx: &TestContext, data: i32| Ok::<_, TestError>(data * 2),
            |ctx: &TestContext, data: &i32, reason: &TestError| {
                ctx.log
                    .borrow_mut()
                    .push(format!("undo double of {data} because {}", reason.0));
                Ok::<_, TestError>(())
            },
        );

        assert_eq!(step.id(), "double");
        assert_eq!(step.execute(&ctx, 21), Ok(42));
        assert_eq!(step.compensate(&ctx, &42, &TestError("boom")), Ok(()));
        assert_eq!(ctx.log.borrow()[0], "undo double of 42 because boom");
    }

    #[test]
    fn fn_step_description_can_be_overridden() {
        let step = FnStep::new(
            "charge",
            |_ctx: &(), data: i32| Ok::<_, TestError>(data),
            |_ctx: &(), _data: &i32, _reason: &TestError| Ok::<_, TestError>(()),
        );
        assert_eq!(step.compensation_description(), "undo charge");

        let step = step.with_description("refund the charge");
        assert_eq!(step.compensation_description(), "refund the charge");
    }
}

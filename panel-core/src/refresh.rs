//! The fetch → format → display chain.
//!
//! Failures of any step end up at a single boundary: they are handed to an
//! [`ErrorReporter`] once and the chain stops. Nothing is retried.

use std::error::Error;

use crate::{
    error::error_chain,
    presenter::{Presentation, WeatherPresenter},
    sink::DisplaySink,
    source::WeatherSource,
};

/// Diagnostic channel receiving one message per failed refresh.
pub trait ErrorReporter {
    fn report(&self, error: &(dyn Error + 'static));
}

/// Routes failures to the `tracing` error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, error: &(dyn Error + 'static)) {
        tracing::error!("Fetch error: {}", error_chain(error));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Displayed(Presentation),
    Failed,
}

impl Outcome {
    pub fn presentation(&self) -> Option<&Presentation> {
        match self {
            Outcome::Displayed(p) => Some(p),
            Outcome::Failed => None,
        }
    }
}

/// Fetch one document from `source`, present it and write it into `sink`.
pub async fn refresh(
    source: &dyn WeatherSource,
    presenter: &WeatherPresenter,
    sink: &mut dyn DisplaySink,
    reporter: &dyn ErrorReporter,
) -> Outcome {
    let doc = match source.fetch().await {
        Ok(doc) => doc,
        Err(err) => {
            reporter.report(&err);
            return Outcome::Failed;
        }
    };

    match presenter.display(&doc, sink) {
        Ok(presentation) => Outcome::Displayed(presentation),
        Err(err) => {
            reporter.report(&*err);
            Outcome::Failed
        }
    }
}

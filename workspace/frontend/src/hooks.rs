use common::{
    FetchOutcome, PredictionCycle, PredictionResult, RequestState, RequestTicket, Resolution,
    ResolutionPolicy, Symbol,
};
use std::rc::Rc;
use yew::prelude::*;

/// Reducer state owning the prediction request lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionStore {
    pub cycle: PredictionCycle,
}

impl PredictionStore {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            cycle: PredictionCycle::new(policy),
        }
    }
}

pub enum PredictionAction {
    Submit {
        ticket: RequestTicket,
        symbol: Symbol,
    },
    Resolve {
        ticket: RequestTicket,
        symbol: Symbol,
        outcome: FetchOutcome,
    },
}

impl Reducible for PredictionStore {
    type Action = PredictionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut cycle = self.cycle.clone();

        match action {
            PredictionAction::Submit { ticket, symbol } => {
                if let RequestState::Pending { symbol: previous } = cycle.state() {
                    log::debug!(
                        "Request {} for {} supersedes pending {}",
                        ticket,
                        symbol,
                        previous
                    );
                }
                cycle.submit(ticket, symbol);
            }
            PredictionAction::Resolve { ticket, symbol, outcome } => {
                let succeeded = outcome.is_ok();
                match cycle.resolve(ticket, symbol.clone(), outcome) {
                    Resolution::Applied if succeeded => {
                        log::info!("Request {} for {} resolved", ticket, symbol)
                    }
                    Resolution::Applied => log::warn!("Request {} for {} failed", ticket, symbol),
                    Resolution::Ignored => {
                        log::debug!("Ignoring stale response {} for {}", ticket, symbol);
                        return self;
                    }
                }
            }
        }

        Rc::new(Self { cycle })
    }
}

/// What the area below the symbol input shows
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionView {
    Predicting,
    /// Empty unless the last applied resolution succeeded
    Chart(PredictionResult),
}

impl From<&RequestState> for PredictionView {
    fn from(state: &RequestState) -> Self {
        if state.is_pending() {
            Self::Predicting
        } else {
            Self::Chart(PredictionResult::from(state.chart_values().to_vec()))
        }
    }
}

/// Read-only view of the prediction cycle handed to components
#[derive(Clone, PartialEq)]
pub struct PredictionContext {
    pub state: RequestState,
    pub submit: Callback<Symbol>,
}

impl PredictionContext {
    pub fn view(&self) -> PredictionView {
        PredictionView::from(&self.state)
    }
}

/// Access the prediction cycle provided by `PredictionProvider`
#[hook]
pub fn use_prediction() -> PredictionContext {
    use_context::<PredictionContext>()
        .expect("PredictionContext must be provided by PredictionProvider")
}

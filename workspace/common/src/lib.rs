//! Domain types shared between the prediction gateway and the browser frontend.
//! Everything here is plain data plus pure transformations, so both sides agree
//! on the symbol rules, the prediction shape and the request lifecycle.

mod chart;
mod prediction;
mod request_state;
mod symbol;

pub use chart::{chart_points, day_label, ChartPoint, SERIES_NAME};
pub use prediction::{FetchFailure, PredictionResult, ShapeError};
pub use request_state::{
    FetchOutcome, PredictionCycle, RequestState, RequestTicket, Resolution, ResolutionPolicy,
    TicketIssuer,
};
pub use symbol::{Symbol, SymbolError};

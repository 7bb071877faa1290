use crate::{FetchFailure, PredictionResult, Symbol};
use std::fmt;
use std::str::FromStr;

/// Outcome of one prediction fetch
pub type FetchOutcome = Result<PredictionResult, FetchFailure>;

/// Sequence number handed out for every Pending transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues strictly increasing tickets. Lives next to whoever starts requests.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    pub fn issue(&mut self) -> RequestTicket {
        self.last += 1;
        RequestTicket(self.last)
    }
}

/// What to do with a response that belongs to a superseded request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Only the most recent submission may resolve the state.
    #[default]
    LatestSubmission,
    /// Every response is applied; whichever arrives last wins.
    LatestArrival,
}

impl FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "latest_submission" => Ok(Self::LatestSubmission),
            "latest_arrival" => Ok(Self::LatestArrival),
            other => Err(format!("unknown resolution policy: {}", other)),
        }
    }
}

/// Lifecycle of the prediction request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        symbol: Symbol,
    },
    Succeeded {
        symbol: Symbol,
        result: PredictionResult,
    },
    Failed {
        symbol: Symbol,
        error: FetchFailure,
    },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Idle => None,
            Self::Pending { symbol }
            | Self::Succeeded { symbol, .. }
            | Self::Failed { symbol, .. } => Some(symbol),
        }
    }

    /// Prices the chart should show. Empty unless the last request succeeded.
    pub fn chart_values(&self) -> &[f64] {
        match self {
            Self::Succeeded { result, .. } => result.values(),
            _ => &[],
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Whether a resolution changed the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Ignored,
}

/// Request state together with the bookkeeping needed to order resolutions.
///
/// Submitting never cancels an in-flight request; it only moves the state to
/// Pending and records the newest ticket. When a response comes back,
/// [`ResolutionPolicy`] decides whether a stale one may still overwrite the
/// state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionCycle {
    state: RequestState,
    policy: ResolutionPolicy,
    latest: Option<RequestTicket>,
    applied: u64,
}

impl PredictionCycle {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Number of resolutions applied so far. Bumps even when two resolutions
    /// leave an identical state behind.
    pub fn applied_resolutions(&self) -> u64 {
        self.applied
    }

    /// Failure the user should be told about, keyed by the resolution that
    /// produced it. Two identical failures in a row get distinct keys.
    pub fn failure_to_notify(&self) -> Option<(u64, &FetchFailure)> {
        self.state.failure().map(|failure| (self.applied, failure))
    }

    /// Enter Pending for `symbol`, discarding whatever state was held.
    pub fn submit(&mut self, ticket: RequestTicket, symbol: Symbol) {
        self.latest = Some(self.latest.map_or(ticket, |latest| latest.max(ticket)));
        self.state = RequestState::Pending { symbol };
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        symbol: Symbol,
        outcome: FetchOutcome,
    ) -> Resolution {
        let Some(latest) = self.latest else {
            return Resolution::Ignored;
        };

        let accept = match self.policy {
            ResolutionPolicy::LatestSubmission => ticket == latest && self.state.is_pending(),
            ResolutionPolicy::LatestArrival => ticket <= latest,
        };
        if !accept {
            return Resolution::Ignored;
        }

        self.state = match outcome {
            Ok(result) => RequestState::Succeeded { symbol, result },
            Err(error) => RequestState::Failed { symbol, error },
        };
        self.applied += 1;
        Resolution::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(raw: &str) -> Symbol {
        Symbol::parse(raw).unwrap()
    }

    fn prices(values: &[f64]) -> FetchOutcome {
        Ok(PredictionResult::new(values.to_vec()))
    }

    #[test]
    fn test_starts_idle_with_nothing_to_chart() {
        let cycle = PredictionCycle::default();
        assert_eq!(cycle.state(), &RequestState::Idle);
        assert!(cycle.state().chart_values().is_empty());
        assert_eq!(cycle.policy(), ResolutionPolicy::LatestSubmission);
    }

    #[test]
    fn test_submit_then_success() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();
        let aapl = sym("aapl ");

        let ticket = issuer.issue();
        cycle.submit(ticket, aapl.clone());
        assert_eq!(cycle.state(), &RequestState::Pending { symbol: aapl.clone() });
        assert!(cycle.state().chart_values().is_empty());

        let outcome = prices(&[101.2, 102.5, 100.9, 103.1, 104.0]);
        assert_eq!(cycle.resolve(ticket, aapl.clone(), outcome), Resolution::Applied);
        assert_eq!(cycle.state().symbol(), Some(&aapl));
        assert_eq!(cycle.state().chart_values(), &[101.2, 102.5, 100.9, 103.1, 104.0]);
    }

    #[test]
    fn test_submit_then_failure_shows_nothing() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();
        let zzzz = sym("ZZZZ");

        let ticket = issuer.issue();
        cycle.submit(ticket, zzzz.clone());
        let outcome = Err(FetchFailure::new(zzzz.clone()));
        assert_eq!(cycle.resolve(ticket, zzzz.clone(), outcome), Resolution::Applied);

        assert_eq!(cycle.state().failure(), Some(&FetchFailure::new(zzzz)));
        assert!(cycle.state().chart_values().is_empty());
        assert!(!cycle.state().is_pending());
    }

    #[test]
    fn test_cycle_restarts_after_completion() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();

        let first = issuer.issue();
        cycle.submit(first, sym("AAPL"));
        cycle.resolve(first, sym("AAPL"), prices(&[1.0]));

        let second = issuer.issue();
        cycle.submit(second, sym("MSFT"));
        assert_eq!(cycle.state(), &RequestState::Pending { symbol: sym("MSFT") });
        assert!(cycle.state().chart_values().is_empty());
    }

    #[test]
    fn test_stale_response_ignored_under_latest_submission() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::new(ResolutionPolicy::LatestSubmission);

        let aapl = issuer.issue();
        cycle.submit(aapl, sym("AAPL"));
        let tsla = issuer.issue();
        cycle.submit(tsla, sym("TSLA"));

        // TSLA first, AAPL straggles in afterwards
        assert_eq!(cycle.resolve(tsla, sym("TSLA"), prices(&[250.0])), Resolution::Applied);
        assert_eq!(cycle.resolve(aapl, sym("AAPL"), prices(&[190.0])), Resolution::Ignored);

        assert_eq!(cycle.state().symbol(), Some(&sym("TSLA")));
        assert_eq!(cycle.state().chart_values(), &[250.0]);
    }

    #[test]
    fn test_stale_response_while_newer_pending_is_ignored() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();

        let aapl = issuer.issue();
        cycle.submit(aapl, sym("AAPL"));
        let tsla = issuer.issue();
        cycle.submit(tsla, sym("TSLA"));

        assert_eq!(cycle.resolve(aapl, sym("AAPL"), prices(&[190.0])), Resolution::Ignored);
        assert_eq!(cycle.state(), &RequestState::Pending { symbol: sym("TSLA") });
    }

    #[test]
    fn test_last_arrival_wins_under_latest_arrival() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::new(ResolutionPolicy::LatestArrival);

        let aapl = issuer.issue();
        cycle.submit(aapl, sym("AAPL"));
        let tsla = issuer.issue();
        cycle.submit(tsla, sym("TSLA"));

        assert_eq!(cycle.resolve(tsla, sym("TSLA"), prices(&[250.0])), Resolution::Applied);
        assert_eq!(cycle.resolve(aapl, sym("AAPL"), prices(&[190.0])), Resolution::Applied);

        // the older request arrived last, so its chart is what remains
        assert_eq!(cycle.state().symbol(), Some(&sym("AAPL")));
        assert_eq!(cycle.state().chart_values(), &[190.0]);
        assert_eq!(cycle.applied_resolutions(), 2);
    }

    #[test]
    fn test_double_resolution_is_ignored() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();

        let ticket = issuer.issue();
        cycle.submit(ticket, sym("AAPL"));
        assert_eq!(cycle.resolve(ticket, sym("AAPL"), prices(&[1.0])), Resolution::Applied);
        assert_eq!(cycle.resolve(ticket, sym("AAPL"), prices(&[2.0])), Resolution::Ignored);
        assert_eq!(cycle.state().chart_values(), &[1.0]);
    }

    #[test]
    fn test_resolve_without_submission_is_ignored() {
        let mut cycle = PredictionCycle::default();
        let ticket = TicketIssuer::default().issue();
        assert_eq!(cycle.resolve(ticket, sym("AAPL"), prices(&[1.0])), Resolution::Ignored);
        assert_eq!(cycle.state(), &RequestState::Idle);
    }

    #[test]
    fn test_repeated_failure_notifies_again() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();
        let zzzz = sym("ZZZZ");
        assert_eq!(cycle.failure_to_notify(), None);

        let first = issuer.issue();
        cycle.submit(first, zzzz.clone());
        assert_eq!(cycle.failure_to_notify(), None);
        cycle.resolve(first, zzzz.clone(), Err(FetchFailure::new(zzzz.clone())));
        let first_key = cycle.failure_to_notify().map(|(key, failure)| (key, failure.clone()));

        let second = issuer.issue();
        cycle.submit(second, zzzz.clone());
        cycle.resolve(second, zzzz.clone(), Err(FetchFailure::new(zzzz.clone())));
        let second_key = cycle.failure_to_notify().map(|(key, failure)| (key, failure.clone()));

        assert!(first_key.is_some());
        assert!(second_key.is_some());
        assert_ne!(first_key, second_key);
        assert_eq!(first_key.map(|(_, f)| f), second_key.map(|(_, f)| f));
    }

    #[test]
    fn test_stale_failure_does_not_notify() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::new(ResolutionPolicy::LatestSubmission);

        let aapl = issuer.issue();
        cycle.submit(aapl, sym("AAPL"));
        let tsla = issuer.issue();
        cycle.submit(tsla, sym("TSLA"));

        let outcome = Err(FetchFailure::new(sym("AAPL")));
        assert_eq!(cycle.resolve(aapl, sym("AAPL"), outcome), Resolution::Ignored);
        assert_eq!(cycle.failure_to_notify(), None);

        cycle.resolve(tsla, sym("TSLA"), prices(&[250.0]));
        assert_eq!(cycle.failure_to_notify(), None);
    }

    #[test]
    fn test_stale_failure_after_failure_keeps_key() {
        let mut issuer = TicketIssuer::default();
        let mut cycle = PredictionCycle::default();

        let aapl = issuer.issue();
        cycle.submit(aapl, sym("AAPL"));
        let tsla = issuer.issue();
        cycle.submit(tsla, sym("TSLA"));
        cycle.resolve(tsla, sym("TSLA"), Err(FetchFailure::new(sym("TSLA"))));
        let before = cycle.failure_to_notify().map(|(key, _)| key);

        cycle.resolve(aapl, sym("AAPL"), Err(FetchFailure::new(sym("AAPL"))));
        assert_eq!(cycle.failure_to_notify().map(|(key, _)| key), before);
        assert_eq!(
            cycle.failure_to_notify().map(|(_, f)| f.clone()),
            Some(FetchFailure::new(sym("TSLA")))
        );
    }

    #[test]
    fn test_tickets_increase() {
        let mut issuer = TicketIssuer::default();
        let a = issuer.issue();
        let b = issuer.issue();
        assert!(b > a);
        assert_eq!(a.value() + 1, b.value());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "latest_submission".parse::<ResolutionPolicy>(),
            Ok(ResolutionPolicy::LatestSubmission)
        );
        assert_eq!(
            "Latest-Arrival".parse::<ResolutionPolicy>(),
            Ok(ResolutionPolicy::LatestArrival)
        );
        assert!("newest".parse::<ResolutionPolicy>().is_err());
    }
}

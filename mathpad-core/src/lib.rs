pub mod panels;
pub mod wire;

use crate::wire::CalculateRequest;

/// Display text shown when equals is pressed with a missing operand or
/// operator.
pub const INCOMPLETE_TEXT: &str = "Error: Incomplete";

/// Display text for a calculation request that never reached the service.
pub const NETWORK_ISSUE_TEXT: &str = "Error: Network issue";

/// Render a service-reported rejection for the display surface.
pub fn service_error_text(message: &str) -> String {
    if message.is_empty() {
        "Error: Unknown error".to_string()
    } else {
        format!("Error: {message}")
    }
}

/// Shortest round-trip rendering of a service result, matching how the
/// display shows numbers (no trailing `.0` on integral values).
pub fn number_text(value: f64) -> String {
    value.to_string()
}

/// Arithmetic operator pending between two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Wire symbol, also used on the display.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Operator> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

/// Reaction to an operator key press. `Chained` carries the intermediate
/// request that must resolve before the new operator takes effect; the
/// session is not mutated until [`Session::finish_chain`] runs.
#[derive(Clone, Debug, PartialEq)]
pub enum OperatorPress {
    /// Nothing entered yet; the press is dropped.
    Ignored,
    /// An operator was already pending with no new digits: substitute it.
    Replaced { display: String },
    /// Both operands present: calculate first, then install the operator.
    Chained { request: CalculateRequest },
    /// First operator: the buffer became the pending operand.
    Committed { display: String },
}

/// Reaction to the equals key.
#[derive(Clone, Debug, PartialEq)]
pub enum EqualsPress {
    /// An operand or the operator is missing; state is left untouched.
    Incomplete { display: String },
    /// Full expression: submit and complete with [`Session::finish_final`].
    Submit { request: CalculateRequest },
}

/// One calculator session: the operand being typed, the operand already
/// committed to the pending operation, and the pending operator.
///
/// Every event method returns the exact text the display must show, so the
/// shell never derives display state on its own.
#[derive(Clone, Debug, Default)]
pub struct Session {
    current: String,
    previous: String,
    operator: Option<Operator>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Append a digit or decimal point to the input buffer. A second
    /// decimal point within the same buffer is dropped silently.
    pub fn push_char(&mut self, c: char) -> String {
        if c == '.' && self.current.contains('.') {
            return self.current.clone();
        }
        self.current.push(c);
        self.current.clone()
    }

    /// Reset everything; the display shows `0`.
    pub fn clear(&mut self) -> String {
        self.current.clear();
        self.previous.clear();
        self.operator = None;
        "0".to_string()
    }

    pub fn press_operator(&mut self, op: Operator) -> OperatorPress {
        if self.current.is_empty() && self.previous.is_empty() {
            return OperatorPress::Ignored;
        }
        if self.current.is_empty() && !self.previous.is_empty() {
            // No digits since the last operator: substitution.
            self.operator = Some(op);
            return OperatorPress::Replaced {
                display: format!("{}{}", self.previous, op.symbol()),
            };
        }
        if let Some(pending) = self.operator
            && !self.previous.is_empty()
        {
            // Chain: resolve the pending operation before the new operator
            // takes over. State mutates in finish_chain once the result is in.
            return OperatorPress::Chained {
                request: CalculateRequest {
                    num1: self.previous.clone(),
                    num2: self.current.clone(),
                    operator: pending.symbol().to_string(),
                },
            };
        }
        self.previous = std::mem::take(&mut self.current);
        self.operator = Some(op);
        OperatorPress::Committed {
            display: format!("{}{}", self.previous, op.symbol()),
        }
    }

    pub fn press_equals(&self) -> EqualsPress {
        let Some(op) = self.operator else {
            return EqualsPress::Incomplete {
                display: INCOMPLETE_TEXT.to_string(),
            };
        };
        if self.previous.is_empty() || self.current.is_empty() {
            return EqualsPress::Incomplete {
                display: INCOMPLETE_TEXT.to_string(),
            };
        }
        EqualsPress::Submit {
            request: CalculateRequest {
                num1: self.previous.clone(),
                num2: self.current.clone(),
                operator: op.symbol().to_string(),
            },
        }
    }

    /// Complete an equals-triggered calculation: the result seeds the next
    /// operation and the pending operand/operator are cleared.
    pub fn finish_final(&mut self, result: f64) -> String {
        let text = number_text(result);
        self.current = text.clone();
        self.previous.clear();
        self.operator = None;
        text
    }

    /// Complete an intermediate calculation: the result becomes the pending
    /// operand and `next` becomes the pending operator.
    pub fn finish_chain(&mut self, result: f64, next: Operator) -> String {
        self.previous = number_text(result);
        self.current.clear();
        self.operator = Some(next);
        format!("{}{}", self.previous, next.symbol())
    }

    /// A calculation failed (service rejection or transport failure). All
    /// operand/operator state is discarded so the next key starts fresh;
    /// intermediate failures reset the same way as final ones.
    pub fn fail(&mut self, message: String) -> String {
        self.current.clear();
        self.previous.clear();
        self.operator = None;
        message
    }
}

/// Serializes calculation requests for one session: at most one request in
/// flight, and a reply that lands after a clear is discarded instead of
/// resurrecting stale state.
///
/// `begin` hands out a ticket the reply must present to `settle`; `reset`
/// (the clear key) invalidates every outstanding ticket. A stale reply
/// leaves the gate untouched, so it can never release a newer request's
/// pending slot.
#[derive(Clone, Debug, Default)]
pub struct RequestGate {
    pending: bool,
    generation: u64,
}

impl RequestGate {
    pub fn new() -> RequestGate {
        RequestGate::default()
    }

    /// A request is outstanding; operator and equals presses are dropped.
    pub fn busy(&self) -> bool {
        self.pending
    }

    /// Claim the in-flight slot. Returns the ticket the reply must present,
    /// or `None` while another request is outstanding.
    pub fn begin(&mut self) -> Option<u64> {
        if self.pending {
            return None;
        }
        self.pending = true;
        Some(self.generation)
    }

    /// Invalidate whatever is in flight and free the slot.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    /// A reply arrived. Returns whether it owns the current generation and
    /// may mutate the session. The generation check comes first: a stale
    /// reply must not clear a pending flag belonging to a newer request.
    pub fn settle(&mut self, ticket: u64) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_number(s: &mut Session, digits: &str) -> String {
        let mut last = String::new();
        for c in digits.chars() {
            last = s.push_char(c);
        }
        last
    }

    #[test]
    fn buffer_is_literal_concatenation_of_accepted_chars() {
        let mut s = Session::new();
        assert_eq!(type_number(&mut s, "12.5"), "12.5");
        assert_eq!(s.current(), "12.5");
    }

    #[test]
    fn second_decimal_point_is_dropped() {
        let mut s = Session::new();
        type_number(&mut s, "1.2");
        assert_eq!(s.push_char('.'), "1.2");
        assert_eq!(s.push_char('3'), "1.23");
    }

    #[test]
    fn decimal_point_allowed_again_after_operator() {
        let mut s = Session::new();
        type_number(&mut s, "1.5");
        s.press_operator(Operator::Add);
        assert_eq!(type_number(&mut s, "0.5"), "0.5");
    }

    #[test]
    fn equals_flow_builds_request_and_resets_pending_state() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        assert_eq!(
            s.press_operator(Operator::Add),
            OperatorPress::Committed {
                display: "5+".to_string()
            }
        );
        type_number(&mut s, "3");
        let EqualsPress::Submit { request } = s.press_equals() else {
            panic!("expected a request");
        };
        assert_eq!(
            request,
            CalculateRequest {
                num1: "5".to_string(),
                num2: "3".to_string(),
                operator: "+".to_string(),
            }
        );
        assert_eq!(s.finish_final(8.0), "8");
        assert_eq!(s.current(), "8");
        assert_eq!(s.previous(), "");
        assert_eq!(s.operator(), None);
    }

    #[test]
    fn equals_without_operands_is_incomplete_and_issues_no_request() {
        let s = Session::new();
        assert_eq!(
            s.press_equals(),
            EqualsPress::Incomplete {
                display: "Error: Incomplete".to_string()
            }
        );
        assert_eq!(s.current(), "");
        assert_eq!(s.previous(), "");
    }

    #[test]
    fn equals_with_missing_second_operand_is_incomplete() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Add);
        assert!(matches!(s.press_equals(), EqualsPress::Incomplete { .. }));
        // State unchanged: typing continues where it left off.
        assert_eq!(s.previous(), "5");
        assert_eq!(s.operator(), Some(Operator::Add));
    }

    #[test]
    fn operator_with_no_input_is_ignored() {
        let mut s = Session::new();
        assert_eq!(s.press_operator(Operator::Add), OperatorPress::Ignored);
        assert_eq!(s.operator(), None);
    }

    #[test]
    fn operator_substitution_updates_display_only() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Add);
        assert_eq!(
            s.press_operator(Operator::Multiply),
            OperatorPress::Replaced {
                display: "5*".to_string()
            }
        );
        assert_eq!(s.previous(), "5");
        assert_eq!(s.operator(), Some(Operator::Multiply));
        assert_eq!(s.current(), "");
    }

    #[test]
    fn chained_operator_issues_intermediate_request_first() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Add);
        type_number(&mut s, "3");
        let OperatorPress::Chained { request } = s.press_operator(Operator::Multiply) else {
            panic!("expected an intermediate request");
        };
        assert_eq!(
            request,
            CalculateRequest {
                num1: "5".to_string(),
                num2: "3".to_string(),
                operator: "+".to_string(),
            }
        );
        // Not yet mutated; the response drives the transition.
        assert_eq!(s.previous(), "5");
        assert_eq!(s.current(), "3");
        assert_eq!(s.operator(), Some(Operator::Add));

        assert_eq!(s.finish_chain(8.0, Operator::Multiply), "8*");
        assert_eq!(s.previous(), "8");
        assert_eq!(s.current(), "");
        assert_eq!(s.operator(), Some(Operator::Multiply));
    }

    #[test]
    fn result_seeds_the_next_operation() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Add);
        type_number(&mut s, "3");
        let _ = s.press_equals();
        s.finish_final(8.0);
        assert_eq!(
            s.press_operator(Operator::Subtract),
            OperatorPress::Committed {
                display: "8-".to_string()
            }
        );
        assert_eq!(s.previous(), "8");
    }

    #[test]
    fn clear_resets_everything_from_any_state() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Add);
        type_number(&mut s, "3");
        assert_eq!(s.clear(), "0");
        assert_eq!(s.current(), "");
        assert_eq!(s.previous(), "");
        assert_eq!(s.operator(), None);
    }

    #[test]
    fn failed_calculation_resets_operands_and_operator() {
        let mut s = Session::new();
        type_number(&mut s, "5");
        s.press_operator(Operator::Divide);
        type_number(&mut s, "0");
        let _ = s.press_equals();
        assert_eq!(
            s.fail(service_error_text("Cannot divide by zero.")),
            "Error: Cannot divide by zero."
        );
        assert_eq!(s.current(), "");
        assert_eq!(s.previous(), "");
        assert_eq!(s.operator(), None);
    }

    #[test]
    fn service_error_text_falls_back_when_message_is_empty() {
        assert_eq!(service_error_text("bad operator"), "Error: bad operator");
        assert_eq!(service_error_text(""), "Error: Unknown error");
    }

    #[test]
    fn number_text_trims_integral_results() {
        assert_eq!(number_text(8.0), "8");
        assert_eq!(number_text(2.5), "2.5");
        assert_eq!(number_text(-0.125), "-0.125");
    }

    #[test]
    fn number_text_stays_in_plain_decimal_for_large_magnitudes() {
        // Unlike JS Number#toString, no switch to exponent form at 1e21.
        assert_eq!(number_text(1e21), "1000000000000000000000");
    }

    #[test]
    fn gate_admits_one_request_at_a_time() {
        let mut gate = RequestGate::new();
        assert!(!gate.busy());
        let ticket = gate.begin().unwrap();
        assert!(gate.busy());
        assert_eq!(gate.begin(), None);
        assert!(gate.settle(ticket));
        assert!(!gate.busy());
    }

    #[test]
    fn reset_discards_the_reply_of_an_in_flight_request() {
        let mut gate = RequestGate::new();
        let ticket = gate.begin().unwrap();
        gate.reset();
        assert!(!gate.busy());
        assert!(!gate.settle(ticket));
    }

    #[test]
    fn stale_reply_cannot_release_a_newer_request() {
        let mut gate = RequestGate::new();
        // First request goes out, then the user clears...
        let first = gate.begin().unwrap();
        gate.reset();
        // ...and submits a second calculation while the first is in flight.
        let second = gate.begin().unwrap();
        assert_ne!(first, second);
        // The first reply lands late: discarded, and the slot stays claimed
        // by the second request.
        assert!(!gate.settle(first));
        assert!(gate.busy());
        assert_eq!(gate.begin(), None);
        // The second reply still settles normally.
        assert!(gate.settle(second));
        assert!(!gate.busy());
    }

    #[test]
    fn operator_symbols_round_trip() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("%"), None);
    }
}

//! Contract model.
//!
//! A contract is a declarative allow-list for action sequences: the steps it
//! knows about, which step may follow which, and a handful of structural
//! rules. Contracts are read-only input. Validators borrow them and never
//! fill in defaults on the caller's value; the accessor methods below return
//! empty slices for absent rules instead.
//!
//! Field names follow the camelCase document shape. snake_case spellings are
//! accepted on input.

use serde::{Deserialize, Serialize};

/// A named position in a contract, bound to one action type.
///
/// Several steps may share an `action_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStep {
    /// Unique within one contract.
    pub id: String,
    /// The action `type` tag this step accepts.
    #[serde(alias = "action_type")]
    pub action_type: String,
    /// Advisory schema reference for the payload. Never interpreted.
    #[serde(
        default,
        alias = "payload_schema_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload_schema_id: Option<String>,
    /// Marks an end step. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<bool>,
}

impl ContractStep {
    /// Create a step.
    pub fn new(id: impl Into<String>, action_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action_type: action_type.into(),
            payload_schema_id: None,
            terminal: None,
        }
    }

    /// Set the payload schema reference.
    pub fn with_payload_schema(mut self, schema_id: impl Into<String>) -> Self {
        self.payload_schema_id = Some(schema_id.into());
        self
    }

    /// Mark this step as terminal.
    pub fn terminal(mut self) -> Self {
        self.terminal = Some(true);
        self
    }

    /// Whether the step is flagged terminal.
    pub fn is_terminal(&self) -> bool {
        self.terminal.unwrap_or(false)
    }
}

/// Allowed successors of one step.
///
/// A step without a rule may be followed by anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Step id the rule applies to.
    pub from: String,
    /// Step ids permitted immediately after `from`.
    pub to: Vec<String>,
}

impl TransitionRule {
    /// Create a rule from a step id and its permitted successors.
    pub fn new<I, S>(from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// Requires every occurrence of `before` to precede the earliest `after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConstraint {
    /// Step id that must come first.
    pub before: String,
    /// Step id that must come later.
    pub after: String,
}

impl OrderConstraint {
    /// Create an ordering constraint.
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Structural rules of a contract. Every field is optional and an absent
/// field imposes nothing.
///
/// `allow_dynamic_insertion` and `max_depth` are accepted and round-tripped
/// but no validator enforces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralRules {
    /// Action types permitted anywhere in a pipeline.
    #[serde(
        default,
        alias = "allowed_action_types",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_action_types: Option<Vec<String>>,
    /// Step ids that must be matched at least once.
    #[serde(
        default,
        alias = "required_steps",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_steps: Option<Vec<String>>,
    /// Pairwise ordering rules between step ids.
    #[serde(
        default,
        alias = "order_constraints",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_constraints: Option<Vec<OrderConstraint>>,
    /// Declared, not enforced.
    #[serde(
        default,
        alias = "allow_dynamic_insertion",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_dynamic_insertion: Option<bool>,
    /// Declared, not enforced.
    #[serde(default, alias = "max_depth", skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,
}

impl StructuralRules {
    /// Empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the permitted action types.
    pub fn with_allowed_action_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_action_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set the required step ids.
    pub fn with_required_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Append an ordering constraint.
    pub fn with_order_constraint(
        mut self,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        self.order_constraints
            .get_or_insert_with(Vec::new)
            .push(OrderConstraint::new(before, after));
        self
    }

    /// Set the dynamic insertion flag.
    pub fn with_dynamic_insertion(mut self, allow: bool) -> Self {
        self.allow_dynamic_insertion = Some(allow);
        self
    }

    /// Set the maximum depth.
    pub fn with_max_depth(mut self, depth: i64) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// A pipeline contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract identifier.
    pub id: String,
    /// Declared steps, in declaration order.
    pub steps: Vec<ContractStep>,
    /// Adjacency rules between steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<TransitionRule>>,
    /// Structural rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralRules>,
}

impl Contract {
    /// Create a contract with no steps and no rules.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            steps: Vec::new(),
            transitions: None,
            structural: None,
        }
    }

    /// Append a step.
    pub fn with_step(mut self, step: ContractStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a transition rule.
    pub fn with_transition(mut self, rule: TransitionRule) -> Self {
        self.transitions.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Set the structural rules.
    pub fn with_structural(mut self, structural: StructuralRules) -> Self {
        self.structural = Some(structural);
        self
    }

    /// Permitted action types. Empty means unconstrained, whether the list
    /// is absent or present but empty.
    pub fn allowed_action_types(&self) -> &[String] {
        self.structural
            .as_ref()
            .and_then(|s| s.allowed_action_types.as_deref())
            .unwrap_or(&[])
    }

    /// Required step ids.
    pub fn required_steps(&self) -> &[String] {
        self.structural
            .as_ref()
            .and_then(|s| s.required_steps.as_deref())
            .unwrap_or(&[])
    }

    /// Ordering constraints.
    pub fn order_constraints(&self) -> &[OrderConstraint] {
        self.structural
            .as_ref()
            .and_then(|s| s.order_constraints.as_deref())
            .unwrap_or(&[])
    }

    /// Transition rules.
    pub fn transitions(&self) -> &[TransitionRule] {
        self.transitions.as_deref().unwrap_or(&[])
    }

    /// Deserialize from a JSON string.
    ///
    /// Fails when `id` or `steps` is missing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON (no whitespace).
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

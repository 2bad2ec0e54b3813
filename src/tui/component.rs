use chrono::NaiveDate;

/// Side effects produced by state transitions
///
/// Reducers and components never call out to their collaborators directly;
/// they return an `Effect` and the owner decides how to deliver it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// The calendar selection changed (`None` when cleared)
    DateChanged(Option<NaiveDate>),
    /// The picker's ISO value changed (`None` when emptied)
    ValueChanged(Option<String>),
    Batch(Vec<Effect>),
}

impl Effect {
    /// Combine two effects, dropping `None`s
    pub fn and(self, other: Effect) -> Effect {
        match (self, other) {
            (Effect::None, e) | (e, Effect::None) => e,
            (Effect::Batch(mut a), Effect::Batch(b)) => {
                a.extend(b);
                Effect::Batch(a)
            }
            (Effect::Batch(mut a), e) => {
                a.push(e);
                Effect::Batch(a)
            }
            (a, b) => Effect::Batch(vec![a, b]),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Flatten into the individual effects, in emission order
    pub fn into_vec(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_vec).collect(),
            effect => vec![effect],
        }
    }
}

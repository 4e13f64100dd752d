//! Problem instance interface.
//!
//! The search never mutates an instance; it only queries capacities and
//! bundle values. Callers with richer representations (conflict sets,
//! non-additive preferences) implement [`Instance`] themselves;
//! [`TableInstance`] covers the common additive-valuation case and is what
//! the tests and benches use.

/// Index of a student.
pub type AgentId = usize;

/// Index of a course.
pub type ItemId = usize;

/// A set of course seats assigned to one student, sorted ascending.
pub type Bundle = Vec<ItemId>;

/// One bundle per student, indexed by [`AgentId`].
pub type Allocation = Vec<Bundle>;

/// Read-only queries the search needs from a course-allocation instance.
///
/// Agents and items are dense indices `0..num_agents()` / `0..num_items()`;
/// mapping to and from external names is the caller's concern.
pub trait Instance: Send + Sync {
    /// Number of students.
    fn num_agents(&self) -> usize;

    /// Number of courses.
    fn num_items(&self) -> usize;

    /// Maximum bundle size for a student.
    fn agent_capacity(&self, agent: AgentId) -> usize;

    /// Maximum number of simultaneous occupants of a course.
    fn item_capacity(&self, item: ItemId) -> usize;

    /// Value a student assigns to a bundle. Must return 0 for the empty
    /// bundle.
    fn bundle_value(&self, agent: AgentId, bundle: &[ItemId]) -> f64;
}

/// Items that can hold at least one occupant.
///
/// Zero-capacity items are invisible to the search: they are excluded from
/// bundle enumeration, so no student can ever be assigned one.
pub fn open_items<I: Instance>(instance: &I) -> Vec<ItemId> {
    (0..instance.num_items())
        .filter(|&item| instance.item_capacity(item) > 0)
        .collect()
}

/// Dense additive-valuation instance.
///
/// A student's value for a bundle is the sum of their per-course values.
///
/// # Examples
///
/// ```
/// use ceei_tabu::{Instance, TableInstance};
///
/// let instance = TableInstance::new(
///     vec![vec![3.0, 4.0, 2.0], vec![4.0, 3.0, 2.0]],
///     vec![2, 2],
///     vec![2, 1, 3],
/// ).unwrap();
/// assert_eq!(instance.num_agents(), 2);
/// assert_eq!(instance.bundle_value(0, &[0, 1]), 7.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableInstance {
    valuations: Vec<Vec<f64>>,
    agent_capacities: Vec<usize>,
    item_capacities: Vec<usize>,
}

impl TableInstance {
    /// Builds an instance from a `[agent][item]` valuation table, per-agent
    /// bundle-size caps, and per-item seat caps.
    pub fn new(
        valuations: Vec<Vec<f64>>,
        agent_capacities: Vec<usize>,
        item_capacities: Vec<usize>,
    ) -> Result<Self, String> {
        if valuations.len() != agent_capacities.len() {
            return Err(format!(
                "valuation rows ({}) must match agent capacities ({})",
                valuations.len(),
                agent_capacities.len()
            ));
        }
        for (agent, row) in valuations.iter().enumerate() {
            if row.len() != item_capacities.len() {
                return Err(format!(
                    "valuation row {} has {} entries, expected {}",
                    agent,
                    row.len(),
                    item_capacities.len()
                ));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(format!("valuation row {agent} contains a non-finite value"));
            }
        }
        Ok(Self {
            valuations,
            agent_capacities,
            item_capacities,
        })
    }

    /// Builds an instance where every agent has the same bundle-size cap.
    pub fn with_uniform_agent_capacity(
        valuations: Vec<Vec<f64>>,
        agent_capacity: usize,
        item_capacities: Vec<usize>,
    ) -> Result<Self, String> {
        let n = valuations.len();
        Self::new(valuations, vec![agent_capacity; n], item_capacities)
    }
}

impl Instance for TableInstance {
    fn num_agents(&self) -> usize {
        self.valuations.len()
    }

    fn num_items(&self) -> usize {
        self.item_capacities.len()
    }

    fn agent_capacity(&self, agent: AgentId) -> usize {
        self.agent_capacities[agent]
    }

    fn item_capacity(&self, item: ItemId) -> usize {
        self.item_capacities[item]
    }

    fn bundle_value(&self, agent: AgentId, bundle: &[ItemId]) -> f64 {
        bundle.iter().map(|&item| self.valuations[agent][item]).sum()
    }
}

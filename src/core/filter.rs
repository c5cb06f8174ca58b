//! Contract / service-front filter state
//!
//! The two filters are dependent: the contract narrows which service fronts
//! can be chosen, and the service front narrows the working subset further.
//! They are always applied in that order.

use serde::Serialize;

use crate::core::dataset::{distinct_non_empty, Dataset, Record};

/// Display label of the sentinel "all" option
pub const ALL_FRONTS: &str = "Todas as Frentes";
pub const ALL_CONTRACTS: &str = "Todos os Contratos";

/// Currently selected filter values; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub contract: Option<String>,
    pub front: Option<String>,
}

/// The valid service-front options for a contract, plus the selection that survives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontResolution {
    /// Distinct non-empty fronts in first-occurrence order (sentinel not included)
    pub domain: Vec<String>,
    /// Previous front if it is still in `domain`, otherwise `None`
    pub front: Option<String>,
}

impl FrontResolution {
    /// Dropdown options with the leading "all" sentinel
    pub fn options(&self) -> Vec<&str> {
        std::iter::once(ALL_FRONTS)
            .chain(self.domain.iter().map(String::as_str))
            .collect()
    }
}

/// Treat empty selections as "all"
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Records belonging to a contract, or all records when no contract is selected
pub fn filter_by_contract<'a>(dataset: &'a Dataset, contract: Option<&str>) -> Vec<&'a Record> {
    match contract {
        Some(c) => dataset
            .records()
            .iter()
            .filter(|r| r.contract() == c)
            .collect(),
        None => dataset.records().iter().collect(),
    }
}

/// Distinct service fronts present in a subset
pub fn front_domain(subset: &[&Record]) -> Vec<String> {
    distinct_non_empty(subset.iter().map(|r| r.service_front()))
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Recompute the front domain for `contract` and keep `previous_front` only if still valid
pub fn resolve_fronts(
    dataset: &Dataset,
    contract: Option<&str>,
    previous_front: Option<&str>,
) -> FrontResolution {
    let subset = filter_by_contract(dataset, contract);
    let domain = front_domain(&subset);
    let front = previous_front
        .filter(|f| domain.iter().any(|d| d == f))
        .map(str::to_string);

    if previous_front.is_some() && front.is_none() {
        tracing::debug!(
            previous = previous_front.unwrap_or_default(),
            "service front not present for contract, reset to all"
        );
    }

    FrontResolution { domain, front }
}

impl FilterSelection {
    pub fn new(contract: Option<String>, front: Option<String>) -> Self {
        Self {
            contract: normalize(contract),
            front: normalize(front),
        }
    }

    /// Change the contract, retaining the front only if it still occurs under the new contract
    pub fn set_contract(&mut self, dataset: &Dataset, contract: Option<String>) -> FrontResolution {
        self.contract = normalize(contract);
        let resolution = resolve_fronts(dataset, self.contract.as_deref(), self.front.as_deref());
        self.front = resolution.front.clone();
        resolution
    }

    /// Change the front within the current contract
    pub fn set_front(&mut self, front: Option<String>) {
        self.front = normalize(front);
    }

    /// Reset both filters to "all"
    pub fn clear(&mut self) {
        self.contract = None;
        self.front = None;
    }

    /// Fronts selectable under the current contract
    pub fn fronts(&self, dataset: &Dataset) -> FrontResolution {
        resolve_fronts(dataset, self.contract.as_deref(), self.front.as_deref())
    }

    /// Working subset: contract first, then service front
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        let by_contract = filter_by_contract(dataset, self.contract.as_deref());
        match self.front.as_deref() {
            Some(front) => by_contract
                .into_iter()
                .filter(|r| r.service_front() == front)
                .collect(),
            None => by_contract,
        }
    }
}

//! Capability traits for framework-facing components.
//!
//! A modular land-surface framework wires components together by
//! standardized variable identifiers (for example
//! `land_surface__net_irradiation_flux`) rather than by internal field
//! names. Each component describes itself through two capabilities:
//!
//! - [`VariableDescribed`]: attribute and variable metadata lookups backed by
//!   an [`AttributeTable`] and a [`VarTable`].
//! - [`InputReadable`]: the open/read/close lifecycle for auxiliary inputs
//!   that come from files instead of sibling components.
//!
//! Lookups distinguish two failure modes. A missing attribute is a
//! recoverable miss and yields `None`. A missing variable identifier is a
//! wiring bug and yields [`MetadataError::UnknownVariable`].

use std::collections::BTreeMap;

use log::warn;
use thiserror::Error;

/// Errors raised by metadata and variable lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The identifier is not known to this component.
    #[error("unknown variable: {id}")]
    UnknownVariable { id: String },

    /// The identifier is known but has no value yet.
    #[error("variable has no value: {id}")]
    Unbound { id: String },

    /// The identifier names a computed output and cannot be set.
    #[error("variable is read-only: {id}")]
    ReadOnly { id: String },

    /// An input or output identifier is missing from the name/unit table.
    #[error("variable listed without a name/unit entry: {id}")]
    Inconsistent { id: String },
}

impl MetadataError {
    pub(crate) fn unknown(id: &str) -> Self {
        Self::UnknownVariable { id: id.to_owned() }
    }
}

/// Internal short name and physical unit for one standardized identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInfo {
    /// Short internal field name, such as `Q_sum`.
    pub name: &'static str,

    /// Unit string, such as `W m-2`.
    pub units: &'static str,
}

/// Immutable variable tables for one component.
///
/// Holds the ordered input and output identifier lists and the combined
/// name/unit lookup. Construction checks that every listed identifier has
/// a lookup entry, so the three tables cannot drift apart.
#[derive(Debug, Clone)]
pub struct VarTable {
    inputs: Vec<&'static str>,
    outputs: Vec<&'static str>,
    vars: BTreeMap<&'static str, VarInfo>,
}

impl VarTable {
    /// Builds a table from identifier lists and `(id, name, units)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Inconsistent`] if an input or output
    /// identifier has no entry.
    pub fn new(
        inputs: &[&'static str],
        outputs: &[&'static str],
        entries: &[(&'static str, &'static str, &'static str)],
    ) -> Result<Self, MetadataError> {
        let vars: BTreeMap<_, _> = entries
            .iter()
            .map(|&(id, name, units)| (id, VarInfo { name, units }))
            .collect();

        if let Some(id) = inputs
            .iter()
            .chain(outputs)
            .find(|id| !vars.contains_key(*id))
        {
            return Err(MetadataError::Inconsistent {
                id: (*id).to_owned(),
            });
        }

        Ok(Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            vars,
        })
    }

    /// Identifiers consumed from other components, in display order.
    #[must_use]
    pub fn inputs(&self) -> &[&'static str] {
        &self.inputs
    }

    /// Identifiers produced by this component, in display order.
    #[must_use]
    pub fn outputs(&self) -> &[&'static str] {
        &self.outputs
    }

    /// Looks up the name and units of an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] if `id` has no entry.
    pub fn info(&self, id: &str) -> Result<VarInfo, MetadataError> {
        self.vars
            .get(id)
            .copied()
            .ok_or_else(|| MetadataError::unknown(id))
    }

    /// Returns `true` if `id` is listed as an output.
    #[must_use]
    pub fn is_output(&self, id: &str) -> bool {
        self.outputs.iter().any(|output| *output == id)
    }
}

/// Static descriptive attributes, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    entries: BTreeMap<&'static str, &'static str>,
}

impl AttributeTable {
    /// Builds a table from `(key, value)` pairs. Keys must be lower case.
    #[must_use]
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    /// Returns the value for `name` after lower-casing it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name.to_lowercase().as_str()).copied()
    }
}

/// Attribute and variable metadata for a framework component.
///
/// Implementors supply the two tables; every lookup has a default
/// implementation in terms of them.
pub trait VariableDescribed {
    /// The component's attribute table.
    fn attributes(&self) -> &AttributeTable;

    /// The component's variable tables.
    fn var_table(&self) -> &VarTable;

    /// Returns a descriptive attribute such as `model_name`.
    ///
    /// Lookup is case-insensitive. A miss is logged and yields `None`.
    fn get_attribute(&self, name: &str) -> Option<&'static str> {
        let value = self.attributes().get(name);
        if value.is_none() {
            warn!("could not find attribute: {name}");
        }
        value
    }

    /// Identifiers this component consumes.
    fn get_input_var_names(&self) -> &[&'static str] {
        self.var_table().inputs()
    }

    /// Identifiers this component produces.
    fn get_output_var_names(&self) -> &[&'static str] {
        self.var_table().outputs()
    }

    /// Translates an identifier to its internal short name.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] if `id` is unrecognized.
    fn get_var_name(&self, id: &str) -> Result<&'static str, MetadataError> {
        Ok(self.var_table().info(id)?.name)
    }

    /// Translates an identifier to its unit string.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] if `id` is unrecognized.
    fn get_var_units(&self, id: &str) -> Result<&'static str, MetadataError> {
        Ok(self.var_table().info(id)?.units)
    }

    /// Returns the storage type of an identifier. All values are `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnknownVariable`] if `id` is unrecognized.
    fn get_var_type(&self, id: &str) -> Result<&'static str, MetadataError> {
        self.var_table().info(id).map(|_| "f64")
    }
}

/// Lifecycle for auxiliary inputs read from files.
///
/// Sources are opened once per run, advanced once per time step, and
/// closed once at teardown.
pub trait InputReadable {
    /// Error produced by any lifecycle step.
    type Error;

    /// Resolves paths and opens a source for each auxiliary input.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be opened.
    fn open_input_files(&mut self) -> Result<(), Self::Error>;

    /// Advances each source by one step, keeping previous values for
    /// sources that yield nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    fn read_input_files(&mut self) -> Result<(), Self::Error>;

    /// Releases every opened source.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to close.
    fn close_input_files(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        attributes: AttributeTable,
        vars: VarTable,
    }

    impl VariableDescribed for Dummy {
        fn attributes(&self) -> &AttributeTable {
            &self.attributes
        }

        fn var_table(&self) -> &VarTable {
            &self.vars
        }
    }

    fn dummy() -> Dummy {
        Dummy {
            attributes: AttributeTable::new(&[("model_name", "Dummy")]),
            vars: VarTable::new(
                &["snow__depth"],
                &["model__time_step"],
                &[("snow__depth", "h_snow", "m"), ("model__time_step", "dt", "s")],
            )
            .unwrap(),
        }
    }

    #[test]
    fn attributes_are_case_insensitive() {
        let d = dummy();
        assert_eq!(d.get_attribute("MODEL_NAME"), Some("Dummy"));
        assert_eq!(d.get_attribute("Model_Name"), Some("Dummy"));
        assert_eq!(d.get_attribute("colour"), None);
    }

    #[test]
    fn variable_lookups() {
        let d = dummy();
        assert_eq!(d.get_input_var_names(), &["snow__depth"]);
        assert_eq!(d.get_output_var_names(), &["model__time_step"]);
        assert_eq!(d.get_var_name("snow__depth"), Ok("h_snow"));
        assert_eq!(d.get_var_units("model__time_step"), Ok("s"));
        assert_eq!(d.get_var_type("model__time_step"), Ok("f64"));
        assert!(d.var_table().is_output("model__time_step"));
        assert!(!d.var_table().is_output("snow__depth"));
    }

    #[test]
    fn unknown_variable_propagates() {
        let d = dummy();
        assert_eq!(
            d.get_var_units("snow__density"),
            Err(MetadataError::UnknownVariable {
                id: "snow__density".into()
            })
        );
        assert!(d.get_var_name("").is_err());
    }

    #[test]
    fn inconsistent_tables_are_rejected() {
        let err = VarTable::new(&["snow__depth"], &[], &[("air__temperature", "T_air", "deg_C")])
            .unwrap_err();
        assert_eq!(
            err,
            MetadataError::Inconsistent {
                id: "snow__depth".into()
            }
        );
    }
}

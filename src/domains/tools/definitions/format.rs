//! Record formatters.
//!
//! Each formatter renders one record as a block of `Label: value` lines in a
//! fixed order. Missing fields print as `N/A` (see [`Field`]).

use crate::domains::chembl::{Field, Record};

/// Render `(label, value)` pairs one per line.
pub fn labelled<V: ToString>(lines: &[(&str, V)]) -> String {
    lines
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A measured value followed by its (optional) unit, e.g. `12.5 nM`.
pub fn measured(value: Field<'_>, units: Field<'_>) -> String {
    format!("{} {}", value, units.or("")).trim_end().to_string()
}

/// Render `name (id)`.
pub fn named_id(name: Field<'_>, id: Field<'_>) -> String {
    format!("{} ({})", name, id)
}

pub fn format_molecule(molecule: &Record) -> String {
    let properties = molecule.nested("molecule_properties");
    labelled(&[
        ("Molecule", molecule.field("pref_name")),
        ("ChEMBL ID", molecule.field("molecule_chembl_id")),
        ("Formula", properties.field("full_molformula")),
        ("Weight", properties.field("full_mwt")),
        ("LogP", properties.field("alogp")),
        ("HBA", properties.field("hba")),
        ("HBD", properties.field("hbd")),
        ("PSA", properties.field("psa")),
        ("Rule of 5 Violations", properties.field("num_ro5_violations")),
        ("Aromatic Rings", properties.field("aromatic_rings")),
    ])
}

pub fn format_target(target: &Record) -> String {
    labelled(&[
        ("Target", target.field("pref_name")),
        ("ChEMBL ID", target.field("target_chembl_id")),
        ("Type", target.field("target_type")),
        ("Organism", target.field("organism")),
    ])
}

pub fn format_assay(assay: &Record) -> String {
    labelled(&[
        ("Assay", assay.field("description")),
        ("ChEMBL ID", assay.field("assay_chembl_id")),
        ("Type", assay.field("assay_type")),
        ("Target", assay.field("target_chembl_id")),
    ])
}

pub fn format_activity(activity: &Record) -> String {
    labelled(&[
        ("Activity Type", activity.field("standard_type").to_string()),
        (
            "Value",
            measured(
                activity.field("standard_value"),
                activity.field("standard_units"),
            ),
        ),
        ("Target", activity.field("target_pref_name").to_string()),
        ("Assay", activity.field("assay_description").to_string()),
        ("Relation", activity.field("standard_relation").to_string()),
        ("Activity ID", activity.field("activity_id").to_string()),
    ])
}

//! Curve category taxonomy for mud-gas chromatography mnemonics.
//!
//! Static domain data: a closed mapping from curve mnemonic to display
//! category, assigned at ingestion. Lookup is exact-case first, then
//! case-insensitive; unmatched mnemonics fall back to "Other".

use std::collections::HashMap;
use std::sync::OnceLock;

/// Fallback category for mnemonics the taxonomy does not know.
pub const CATEGORY_OTHER: &str = "Other";

/// (mnemonic, category) pairs. Grouped by category for maintenance.
static CURVE_CATEGORIES: &[(&str, &str)] = &[
    // Hydrocarbons
    ("HC1", "Hydrocarbons"),
    ("HC2", "Hydrocarbons"),
    ("HC3", "Hydrocarbons"),
    ("HC4", "Hydrocarbons"),
    ("HC5", "Hydrocarbons"),
    ("HC6", "Hydrocarbons"),
    ("HC7", "Hydrocarbons"),
    ("HC8", "Hydrocarbons"),
    ("HC9", "Hydrocarbons"),
    ("HC10", "Hydrocarbons"),
    ("TOTAL_GAS", "Hydrocarbons"),
    ("RAW_NAPH", "Hydrocarbons"),
    ("nC4", "Hydrocarbons"),
    ("nC6", "Hydrocarbons"),
    ("cC6", "Hydrocarbons"),
    // Normalized hydrocarbons
    ("NormC1", "Normalized"),
    ("NormC4", "Normalized"),
    ("NormC7", "Normalized"),
    ("NormBen_Tol", "Normalized"),
    ("NormBen", "Normalized"),
    ("NormTol", "Normalized"),
    ("NormHe", "Normalized"),
    ("NormH", "Normalized"),
    ("NormCO2", "Normalized"),
    ("NormCO2pp", "Normalized"),
    ("NormN2", "Normalized"),
    ("NormO2", "Normalized"),
    ("NormAr", "Normalized"),
    // Pixler ratios
    ("PIX1", "Pixler Ratios"),
    ("PIX2", "Pixler Ratios"),
    ("PIX3", "Pixler Ratios"),
    ("PIX4", "Pixler Ratios"),
    // Composition
    ("Para", "Composition"),
    ("Naph", "Composition"),
    ("Arom", "Composition"),
    ("Ben_Tol", "Composition"),
    // Aromatics
    ("Benzene", "Aromatics"),
    ("Toluene", "Aromatics"),
    ("Xylene", "Aromatics"),
    ("TotalArom", "Aromatics"),
    ("Arom_cHex", "Aromatics"),
    ("Arom_Alk", "Aromatics"),
    // Atmospheric gases
    ("Helium", "Atmospheric"),
    ("Hydrogen", "Atmospheric"),
    ("CO2Raw", "Atmospheric"),
    ("CO2pp", "Atmospheric"),
    ("CO2calc2", "Atmospheric"),
    ("N2", "Atmospheric"),
    ("O2", "Atmospheric"),
    ("Ar", "Atmospheric"),
    ("H2O", "Atmospheric"),
    ("Air1", "Atmospheric"),
    ("Air2", "Atmospheric"),
    // Sulfur compounds
    ("SO", "Sulfur"),
    ("SO2", "Sulfur"),
    ("CS2", "Sulfur"),
    ("Sulf_HC", "Sulfur"),
    // Derived ratios
    ("C3_C1", "Ratios"),
    ("C3_C2", "Ratios"),
    ("C5_C1", "Ratios"),
    ("nC4_C1", "Ratios"),
    ("C1_THC", "Ratios"),
    ("G_L", "Ratios"),
    ("HCvsW", "Ratios"),
    ("Ben_C1", "Ratios"),
    ("Ben_cHex", "Ratios"),
    ("Ben_cC6", "Ratios"),
    ("Ben_nC6", "Ratios"),
    ("AA_nC4", "Ratios"),
    ("He_C1", "Ratios"),
    ("CO2_C1", "Ratios"),
    ("Tol_nC7", "Ratios"),
    ("HC2_HC1", "Ratios"),
    ("HC3_HC1", "Ratios"),
    ("HC5_HC3", "Ratios"),
    ("HC7_HC3", "Ratios"),
    ("Permratio", "Ratios"),
    ("GO", "Ratios"),
    // Standard petrophysics
    ("GR", "Petrophysics"),
    ("GAMMA", "Petrophysics"),
    ("NPHI", "Petrophysics"),
    ("RHOB", "Petrophysics"),
    ("DPHI", "Petrophysics"),
    ("DT", "Petrophysics"),
    ("SP", "Petrophysics"),
    ("PEF", "Petrophysics"),
    ("ILD", "Resistivity"),
    ("ILM", "Resistivity"),
    ("LLD", "Resistivity"),
    ("LLS", "Resistivity"),
    ("SFLU", "Resistivity"),
    ("RES", "Resistivity"),
    ("CALI", "Drilling"),
    ("CAL", "Drilling"),
    ("BS", "Drilling"),
    // Calculated
    ("Wh_calc", "Calculated"),
    ("Bh_calc", "Calculated"),
    ("Ch_calc", "Calculated"),
    ("C2calc", "Calculated"),
    ("MZ34", "Calculated"),
    ("Percent_Gas", "Calculated"),
    ("AceticAcid", "Calculated"),
    // Drilling
    ("ROP(min/ft)", "Drilling"),
    ("ROP(ft/hr)", "Drilling"),
    ("ROP", "Drilling"),
    ("BIT", "Drilling"),
    ("RPM", "Drilling"),
    ("WOB", "Drilling"),
    ("TQR", "Drilling"),
    // OBM corrections
    ("OBMC3", "OBM Corrections"),
    ("OBMC4", "OBM Corrections"),
    ("OBMC5", "OBM Corrections"),
    ("OBMC6", "OBM Corrections"),
    ("OBMC7", "OBM Corrections"),
    ("OBMC8", "OBM Corrections"),
    ("OBMC9", "OBM Corrections"),
    // Atmosphere ratios
    ("Atm", "Atmosphere Ratios"),
    ("Atm_TOT", "Atmosphere Ratios"),
    ("Atm_NormTOT", "Atmosphere Ratios"),
    ("N_Atm", "Atmosphere Ratios"),
    ("O_Atm", "Atmosphere Ratios"),
    ("Ar_Atm", "Atmosphere Ratios"),
    // Other / index
    ("TL", "Other"),
    ("HC", "Other"),
    ("ExtSen1", "Other"),
    ("ExtSen2", "Other"),
    ("Time", "Other"),
    ("Depth", "Index"),
    ("DEPT", "Index"),
];

fn exact_lookup() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| CURVE_CATEGORIES.iter().copied().collect())
}

fn upper_lookup() -> &'static HashMap<String, &'static str> {
    static MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        CURVE_CATEGORIES
            .iter()
            .map(|&(mnemonic, category)| (mnemonic.to_uppercase(), category))
            .collect()
    })
}

/// Category for a curve mnemonic (case-insensitive, "Other" fallback).
pub fn categorize(mnemonic: &str) -> &'static str {
    exact_lookup()
        .get(mnemonic)
        .or_else(|| upper_lookup().get(&mnemonic.to_uppercase()))
        .copied()
        .unwrap_or(CATEGORY_OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_case_mnemonics_resolve() {
        assert_eq!(categorize("HC1"), "Hydrocarbons");
        assert_eq!(categorize("ROP(ft/hr)"), "Drilling");
        assert_eq!(categorize("Ben_Tol"), "Composition");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(categorize("hc1"), "Hydrocarbons");
        assert_eq!(categorize("NORMC1"), "Normalized");
        assert_eq!(categorize("total_gas"), "Hydrocarbons");
    }

    #[test]
    fn unknown_mnemonics_fall_back_to_other() {
        assert_eq!(categorize("NOT_A_CURVE"), CATEGORY_OTHER);
        assert_eq!(categorize(""), CATEGORY_OTHER);
    }
}

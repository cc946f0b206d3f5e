//! Residue name translation.

/// One-letter code for any residue missing from the code table.
pub const UNKNOWN_RESIDUE: char = 'X';

/// Translate a three-letter residue name into its one-letter code.
///
/// The table covers the twenty standard amino acids plus a fixed set of
/// post-translationally modified variants, which map onto their parent
/// residue. Everything else (ligands, water, nucleotides) becomes
/// [`UNKNOWN_RESIDUE`], so the lookup never fails.
pub fn one_letter_code(resn: &str) -> char {
    match resn.to_ascii_uppercase().as_str() {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        // Phosphorylation
        "SEP" => 'S',
        "TPO" => 'T',
        "PTR" => 'Y',
        // Lysine acetylation and methylation
        "ALY" | "MLY" | "MLZ" | "M3L" => 'K',
        "HYP" => 'P',
        "AGM" | "2MR" => 'R',
        "MSE" => 'M',
        "CSX" | "CAS" | "CME" => 'C',
        _ => UNKNOWN_RESIDUE,
    }
}

/// Inverse of [`one_letter_code`] for the standard residues, used to build
/// synthetic structures in tests.
#[cfg(test)]
pub(crate) fn three_letter_code(code: char) -> &'static str {
    match code {
        'A' => "ALA",
        'R' => "ARG",
        'N' => "ASN",
        'D' => "ASP",
        'C' => "CYS",
        'Q' => "GLN",
        'E' => "GLU",
        'G' => "GLY",
        'H' => "HIS",
        'I' => "ILE",
        'L' => "LEU",
        'K' => "LYS",
        'M' => "MET",
        'F' => "PHE",
        'P' => "PRO",
        'S' => "SER",
        'T' => "THR",
        'W' => "TRP",
        'Y' => "TYR",
        'V' => "VAL",
        _ => "UNK",
    }
}

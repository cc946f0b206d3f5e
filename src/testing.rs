//! Shared helpers for unit tests.

use crate::residues::three_letter_code;

/// Read a file from `test-data/`.
pub(crate) fn fixture(name: &str) -> String {
    let root = env!("CARGO_MANIFEST_DIR");
    let path = format!("{root}/test-data/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

/// Build a minimal mmCIF document holding one chain per `(chain_id, sequence)`
/// pair, with an N and a CA atom for every residue.
pub(crate) fn synthetic_cif(chains: &[(&str, &str)]) -> String {
    let strand_ids: Vec<&str> = chains.iter().map(|(id, _)| *id).collect();
    let mut lines = vec![
        "data_SYNTH".to_string(),
        "#".to_string(),
        "_entry.id SYNTH".to_string(),
        "#".to_string(),
        format!("_entity_poly.pdbx_strand_id {}", strand_ids.join(",")),
        "#".to_string(),
        "loop_".to_string(),
    ];
    for column in [
        "group_PDB",
        "id",
        "type_symbol",
        "label_atom_id",
        "label_comp_id",
        "label_asym_id",
        "label_seq_id",
        "Cartn_x",
        "Cartn_y",
        "Cartn_z",
        "auth_seq_id",
        "auth_asym_id",
    ] {
        lines.push(format!("_atom_site.{column}"));
    }

    let mut serial = 0;
    for (chain_id, sequence) in chains {
        for (i, code) in sequence.chars().enumerate() {
            let resn = three_letter_code(code);
            let resi = i + 1;
            for (element, atom) in [("N", "N"), ("C", "CA")] {
                serial += 1;
                let x = 3.8 * i as f64;
                lines.push(format!(
                    "ATOM {serial} {element} {atom} {resn} {chain_id} {resi} {x:.3} 0.000 0.000 {resi} {chain_id}"
                ));
            }
        }
    }
    lines.push("#".to_string());

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

use super::CifError;
use super::lexer::{Spanned, Token, tokenize};
use crate::core::io::traits::StructureFile;
use crate::core::metadata::raw::{CifDictionary, is_cif_placeholder};
use crate::core::models::atom::{Atom, element_from_name};
use crate::core::models::builder::{ResidueSite, StructureBuilder};
use crate::core::models::residue::ResidueKind;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::BufRead;
use std::str::FromStr;

type Column<'a> = (&'static str, &'a [String]);

/// Folds a CIF document into a flat dictionary.
///
/// Single data items map to one value; loop values are distributed over the
/// loop's data names row by row. All data blocks contribute to the same
/// dictionary, the first block code is remembered.
pub fn parse_dictionary(text: &str) -> Result<CifDictionary, CifError> {
    let tokens = tokenize(text)?;
    let mut dict = CifDictionary::new();
    let mut i = 0;

    while let Some(&Spanned { token, line }) = tokens.get(i) {
        match token {
            Token::DataBlock(name) => {
                dict.set_block(name);
                i += 1;
            }
            Token::DataName(name) => match tokens.get(i + 1).and_then(|t| t.token.as_value()) {
                Some(value) => {
                    dict.push(name, value.to_string());
                    i += 2;
                }
                None => {
                    return Err(CifError::MissingValue {
                        name: name.to_string(),
                        line,
                    });
                }
            },
            Token::Loop => i = read_loop(&tokens, i + 1, line, &mut dict)?,
            other => {
                return Err(CifError::UnexpectedValue {
                    value: other.as_value().unwrap_or_default().to_string(),
                    line,
                });
            }
        }
    }

    Ok(dict)
}

fn read_loop(
    tokens: &[Spanned<'_>],
    mut i: usize,
    line: usize,
    dict: &mut CifDictionary,
) -> Result<usize, CifError> {
    let mut columns = Vec::new();
    while let Some(Spanned {
        token: Token::DataName(name),
        ..
    }) = tokens.get(i)
    {
        columns.push(*name);
        i += 1;
    }

    let mut values = Vec::new();
    while let Some(value) = tokens.get(i).and_then(|t| t.token.as_value()) {
        values.push(value);
        i += 1;
    }

    if columns.is_empty() || values.len() % columns.len() != 0 {
        return Err(CifError::LoopArity {
            line,
            columns: columns.len(),
            values: values.len(),
        });
    }
    for (k, value) in values.iter().enumerate() {
        dict.push(columns[k % columns.len()], value.to_string());
    }
    Ok(i)
}

fn optional_column<'a>(
    dict: &'a CifDictionary,
    candidates: &[&'static str],
    rows: usize,
) -> Result<Option<Column<'a>>, CifError> {
    let Some(column) = candidates
        .iter()
        .find_map(|&name| dict.get(name).map(|values| (name, values)))
    else {
        return Ok(None);
    };
    if column.1.len() != rows {
        return Err(CifError::ColumnLength {
            column: column.0.to_string(),
            expected: rows,
            found: column.1.len(),
        });
    }
    Ok(Some(column))
}

fn required_column<'a>(
    dict: &'a CifDictionary,
    candidates: &[&'static str],
    rows: usize,
) -> Result<Column<'a>, CifError> {
    optional_column(dict, candidates, rows)?.ok_or(CifError::MissingColumn(candidates[0]))
}

fn number<T: FromStr>(column: Column<'_>, row: usize) -> Result<T, CifError> {
    let value = column.1[row].as_str();
    value.parse().map_err(|_| CifError::InvalidNumber {
        column: column.0.to_string(),
        row: row + 1,
        value: value.to_string(),
    })
}

fn present(column: Option<Column<'_>>, row: usize) -> Option<&str> {
    column
        .map(|(_, values)| values[row].as_str())
        .filter(|v| !is_cif_placeholder(v))
}

fn build_structure(dict: &CifDictionary) -> Result<Structure, CifError> {
    let mut builder = StructureBuilder::new();
    if !dict.has_category("_atom_site") {
        return Ok(builder.build());
    }

    let rows = dict
        .get("_atom_site.Cartn_x")
        .map(<[String]>::len)
        .ok_or(CifError::MissingColumn("_atom_site.Cartn_x"))?;
    let x = required_column(dict, &["_atom_site.Cartn_x"], rows)?;
    let y = required_column(dict, &["_atom_site.Cartn_y"], rows)?;
    let z = required_column(dict, &["_atom_site.Cartn_z"], rows)?;
    let atom_name = required_column(
        dict,
        &["_atom_site.label_atom_id", "_atom_site.auth_atom_id"],
        rows,
    )?;
    let comp = required_column(
        dict,
        &["_atom_site.label_comp_id", "_atom_site.auth_comp_id"],
        rows,
    )?;
    let asym = required_column(
        dict,
        &["_atom_site.auth_asym_id", "_atom_site.label_asym_id"],
        rows,
    )?;
    let seq = required_column(
        dict,
        &["_atom_site.auth_seq_id", "_atom_site.label_seq_id"],
        rows,
    )?;
    let group = optional_column(dict, &["_atom_site.group_PDB"], rows)?;
    let ins_code = optional_column(dict, &["_atom_site.pdbx_PDB_ins_code"], rows)?;
    let alt = optional_column(dict, &["_atom_site.label_alt_id"], rows)?;
    let occupancy = optional_column(dict, &["_atom_site.occupancy"], rows)?;
    let b_factor = optional_column(dict, &["_atom_site.B_iso_or_equiv"], rows)?;
    let type_symbol = optional_column(dict, &["_atom_site.type_symbol"], rows)?;
    let model = optional_column(dict, &["_atom_site.pdbx_PDB_model_num"], rows)?;

    let mut current_model = None;
    for row in 0..rows {
        if let Some(model) = model {
            let serial: i32 = number(model, row)?;
            if current_model != Some(serial) {
                builder.end_frame().start_frame(serial);
                current_model = Some(serial);
            }
        }

        let name = atom_name.1[row].as_str();
        let position = Point3::new(
            number::<f64>(x, row)? as f32,
            number::<f64>(y, row)? as f32,
            number::<f64>(z, row)? as f32,
        );
        let element = match present(type_symbol, row) {
            Some(symbol) => symbol.to_ascii_uppercase(),
            None => element_from_name(name),
        };

        let mut atom = Atom::new(name, &element, position);
        atom.alt_loc = present(alt, row).and_then(|v| v.chars().next());
        if occupancy.is_some() {
            atom.occupancy = present(occupancy, row).and_then(|v| v.parse().ok());
        }
        atom.b_factor = present(b_factor, row)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.0);

        let site = ResidueSite {
            chain_id: asym.1[row].as_str(),
            seq: number(seq, row)?,
            insertion_code: present(ins_code, row).and_then(|v| v.chars().next()),
            name: comp.1[row].as_str(),
            kind: match present(group, row) {
                Some(g) if g.eq_ignore_ascii_case("HETATM") => ResidueKind::Hetero,
                _ => ResidueKind::Standard,
            },
        };
        builder.add_atom(&site, atom);
    }

    Ok(builder.build())
}

pub struct CifFile;

impl StructureFile for CifFile {
    type Metadata = CifDictionary;
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let dict = parse_dictionary(&text)?;
        let structure = build_structure(&dict)?;
        Ok((structure, dict))
    }
}

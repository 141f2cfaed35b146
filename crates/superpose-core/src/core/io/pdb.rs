use crate::core::io::traits::{StructureFile, StructureWriter};
use crate::core::metadata::raw::PdbHeader;
use crate::core::models::atom::{Atom, element_from_name};
use crate::core::models::builder::{ResidueSite, StructureBuilder};
use crate::core::models::residue::ResidueKind;
use crate::core::models::structure::Structure;
use chrono::NaiveDate;
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Chain identifier '{0}' does not fit the single-character chain column")]
    ChainIdTooLong(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

fn column_char(line: &str, col: usize) -> Option<char> {
    line.get(col..col + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_int(line: &str, line_num: usize, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_coord(line: &str, line_num: usize, start: usize, end: usize) -> Result<f32, PdbError> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .map(|v| v as f32)
        .map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidFloat {
                columns: format!("{}-{}", start + 1, end),
                value: value.into(),
            },
        })
}

/// Converts a legacy `DD-MON-YY` date into `YYYY-MM-DD`.
///
/// Two-digit years below 50 belong to the 2000s, the rest to the 1900s.
fn legacy_date_to_iso(raw: &str) -> Option<String> {
    let day: u32 = raw.get(0..2)?.trim().parse().ok()?;
    let month_name = raw.get(3..6)?.to_ascii_uppercase();
    let month = MONTHS.iter().position(|m| *m == month_name)? as u32 + 1;
    let yy: i32 = raw.get(7..9)?.parse().ok()?;
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

fn join_continuations(parts: &[String]) -> String {
    let mut joined = String::new();
    for part in parts {
        if !joined.is_empty() && !joined.ends_with('-') {
            joined.push(' ');
        }
        joined.push_str(part);
    }
    joined
}

/// Splits concatenated `COMPND`/`SOURCE` text into one map per `MOL_ID` entity.
fn parse_specifications(text: &str) -> Vec<BTreeMap<String, String>> {
    let mut entities: Vec<BTreeMap<String, String>> = Vec::new();
    for piece in text.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = match piece.split_once(':') {
            Some((key, value)) => (key.trim().to_ascii_lowercase(), value.trim().to_string()),
            None => ("misc".to_string(), piece.to_string()),
        };
        if key == "mol_id" || entities.is_empty() {
            entities.push(BTreeMap::new());
        }
        if let Some(entity) = entities.last_mut() {
            entity
                .entry(key)
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
    }
    entities
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbHeader;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut header = PdbHeader::default();
        let mut title_parts = Vec::new();
        let mut compound_parts = Vec::new();
        let mut source_parts = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "HEADER" => {
                    let head = slice_and_trim(&line, 10, 50);
                    if !head.is_empty() {
                        header.fields.insert("head".into(), head.to_string());
                    }
                    if let Some(date) = legacy_date_to_iso(slice_and_trim(&line, 50, 59)) {
                        header.fields.insert("deposition_date".into(), date);
                    }
                    let idcode = slice_and_trim(&line, 62, 66);
                    if !idcode.is_empty() {
                        header.fields.insert("idcode".into(), idcode.to_string());
                    }
                }
                "TITLE" => title_parts.push(slice_and_trim(&line, 10, 80).to_string()),
                "COMPND" => compound_parts.push(slice_and_trim(&line, 10, 80).to_string()),
                "SOURCE" => source_parts.push(slice_and_trim(&line, 10, 80).to_string()),
                "MODEL" => {
                    let serial = if slice_and_trim(&line, 10, 14).is_empty() {
                        let position = builder.frame_count() as i32;
                        warn!(
                            "MODEL record on line {} has no serial; using {}.",
                            line_num, position
                        );
                        position
                    } else {
                        parse_int(&line, line_num, 10, 14)? as i32
                    };
                    builder.start_frame(serial);
                }
                "ENDMDL" => {
                    builder.end_frame();
                }
                record @ ("ATOM" | "HETATM") => {
                    let name = slice_and_trim(&line, 12, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = line.get(21..22).unwrap_or(" ");
                    let seq = parse_int(&line, line_num, 22, 26)?;
                    let x = parse_coord(&line, line_num, 30, 38)?;
                    let y = parse_coord(&line, line_num, 38, 46)?;
                    let z = parse_coord(&line, line_num, 46, 54)?;

                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => element_from_name(name),
                        symbol => symbol.to_ascii_uppercase(),
                    };
                    let mut atom = Atom::new(name, &element, Point3::new(x, y, z));
                    atom.alt_loc = column_char(&line, 16);
                    atom.occupancy = slice_and_trim(&line, 54, 60).parse().ok();
                    atom.b_factor = slice_and_trim(&line, 60, 66).parse().unwrap_or(0.0);

                    let site = ResidueSite {
                        chain_id,
                        seq,
                        insertion_code: column_char(&line, 26),
                        name: res_name,
                        kind: if record == "HETATM" {
                            ResidueKind::Hetero
                        } else {
                            ResidueKind::Standard
                        },
                    };
                    builder.add_atom(&site, atom);
                }
                "END" => break,
                _ => {}
            }
        }

        if !title_parts.is_empty() {
            header
                .fields
                .insert("name".into(), join_continuations(&title_parts));
        }
        header.compound = parse_specifications(&join_continuations(&compound_parts));
        header.source = parse_specifications(&join_continuations(&source_parts));

        Ok((builder.build(), header))
    }
}

/// Pads a bare atom name into the four-column name field.
///
/// Names shorter than four characters that start with a letter and belong to
/// a one-letter element are shifted right by one column.
fn padded_atom_name(name: &str, element: &str) -> String {
    let shifted = name.len() < 4
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && element.trim().len() < 2;
    if shifted {
        format!(" {}", name)
    } else {
        name.to_string()
    }
}

fn single_char_chain_id(id: &str) -> Result<char, PdbError> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Ok(' '),
        _ => Err(PdbError::ChainIdTooLong(id.to_string())),
    }
}

impl StructureWriter for PdbFile {
    type Error = PdbError;

    fn write_structure_to(
        structure: &Structure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let multi_frame = structure.frames().len() > 1;

        for frame in structure.frames() {
            if multi_frame {
                writeln!(writer, "{:<80}", format!("MODEL     {:>4}", frame.serial))?;
            }
            let mut serial = 1usize;

            for chain in frame.chains() {
                let chain_id = single_char_chain_id(&chain.id)?;

                for residue in chain.residues() {
                    let record = if residue.is_hetero() {
                        "HETATM"
                    } else {
                        "ATOM  "
                    };
                    for atom in residue.atoms() {
                        let element = atom.element.trim().to_ascii_uppercase();
                        let occupancy = atom
                            .occupancy
                            .map_or_else(|| " ".repeat(6), |o| format!("{:>6.2}", o));
                        writeln!(
                            writer,
                            "{}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{}{:>6.2}      {:>4}{:>2}{:>2}",
                            record,
                            serial,
                            padded_atom_name(&atom.name, &element),
                            atom.alt_loc.unwrap_or(' '),
                            residue.name,
                            chain_id,
                            residue.seq,
                            residue.insertion_code.unwrap_or(' '),
                            atom.position.x,
                            atom.position.y,
                            atom.position.z,
                            occupancy,
                            atom.b_factor,
                            "",
                            element,
                            "",
                        )?;
                        serial += 1;
                    }
                }

                if let Some(last) = chain.residues().last() {
                    let ter = format!(
                        "TER   {:>5}      {:>3} {}{:>4}{}",
                        serial,
                        last.name,
                        chain_id,
                        last.seq,
                        last.insertion_code.unwrap_or(' '),
                    );
                    writeln!(writer, "{:<80}", ter)?;
                    serial += 1;
                }
            }

            if multi_frame {
                writeln!(writer, "{:<80}", "ENDMDL")?;
            }
        }

        writeln!(writer, "{:<80}", "END")?;
        Ok(())
    }
}

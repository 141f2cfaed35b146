use super::traits::StructureWriter;
use crate::core::metadata::normalize::HeaderFields;
use crate::core::models::structure::Structure;
use std::io::{self, Write};

const CONTINUATION_WIDTH: usize = 67;

/// Continuation label of a wrapped header record.
///
/// Starts at 2 and saturates at 9, so every overflow line past the eighth
/// keeps the label 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationCounter(u8);

impl Default for ContinuationCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContinuationCounter {
    pub fn new() -> Self {
        Self(2)
    }

    pub fn current(&self) -> u8 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = (self.0 + 1).min(9);
    }
}

/// Splits `text` after at most `width` characters.
fn split_chars(text: &str, width: usize) -> (&str, &str) {
    match text.char_indices().nth(width) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

/// Writes descriptive header records followed by a coordinate body, laying
/// every field out in fixed columns.
pub struct FixedWidthWriter<W: Write> {
    writer: W,
}

impl<W: Write> FixedWidthWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the header records and then the body produced by `S`.
    pub fn write<S: StructureWriter>(
        &mut self,
        fields: &HeaderFields,
        structure: &Structure,
    ) -> Result<(), S::Error> {
        self.write_header(fields)?;
        S::write_structure_to(structure, &mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_header(&mut self, fields: &HeaderFields) -> io::Result<()> {
        writeln!(
            self.writer,
            "HEADER    {:<39} {:<9} {:<17}",
            split_chars(&fields.classification, 39).0,
            split_chars(&fields.deposition_date, 9).0,
            split_chars(&fields.code, 17).0,
        )?;

        let (first, rest) = split_chars(&fields.title, 68);
        writeln!(self.writer, "TITLE     {:<68}", first)?;
        self.write_continuations("TITLE", rest, &mut ContinuationCounter::new())?;

        writeln!(self.writer, "COMPND    MOL_ID: 1;{}", " ".repeat(58))?;
        let mut compound_counter = ContinuationCounter::new();
        self.write_block("COMPND", "MOLECULE: ", &fields.compound, 57, &mut compound_counter)?;

        writeln!(self.writer, "SOURCE    MOL_ID: 1;{}", " ".repeat(58))?;
        let mut source_counter = ContinuationCounter::new();
        self.write_block(
            "SOURCE",
            "ORGANISM_SCIENTIFIC: ",
            &fields.organism_scientific,
            46,
            &mut source_counter,
        )?;
        self.write_block(
            "SOURCE",
            "ORGANISM_COMMON: ",
            &fields.organism_common,
            50,
            &mut source_counter,
        )?;
        if !fields.taxonomy_id.is_empty() {
            writeln!(
                self.writer,
                "SOURCE   {} ORGANISM_TAXID: {:<51}",
                source_counter.current(),
                split_chars(&fields.taxonomy_id, 51).0,
            )?;
            source_counter.advance();
        }

        writeln!(self.writer, "REMARK   1 SUPERPOSITION BY GTALIGN{}", " ".repeat(44))
    }

    /// Writes a tagged specification line and its overflow; nothing at all
    /// when `text` is empty.
    fn write_block(
        &mut self,
        record: &str,
        tag: &str,
        text: &str,
        width: usize,
        counter: &mut ContinuationCounter,
    ) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let (first, rest) = split_chars(text, width);
        writeln!(
            self.writer,
            "{:<9}{} {}{:<width$}",
            record,
            counter.current(),
            tag,
            first,
            width = width
        )?;
        counter.advance();
        self.write_continuations(record, rest, counter)
    }

    fn write_continuations(
        &mut self,
        record: &str,
        mut text: &str,
        counter: &mut ContinuationCounter,
    ) -> io::Result<()> {
        while !text.is_empty() {
            let (line, rest) = split_chars(text, CONTINUATION_WIDTH);
            writeln!(
                self.writer,
                "{:<9}{} {:<67}",
                record,
                counter.current(),
                line
            )?;
            counter.advance();
            text = rest;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_lines(fields: &HeaderFields) -> Vec<String> {
        let mut writer = FixedWidthWriter::new(Vec::new());
        writer.write_header(fields).unwrap();
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn label(line: &str) -> &str {
        &line[9..10]
    }

    #[test]
    fn continuation_counter_saturates_at_nine() {
        let mut counter = ContinuationCounter::new();
        let labels: Vec<_> = (0..10)
            .map(|_| {
                let current = counter.current();
                counter.advance();
                current
            })
            .collect();
        assert_eq!(labels, vec![2, 3, 4, 5, 6, 7, 8, 9, 9, 9]);
    }

    #[test]
    fn split_chars_counts_characters_not_bytes() {
        assert_eq!(split_chars("ÅBCD", 2), ("ÅB", "CD"));
        assert_eq!(split_chars("AB", 5), ("AB", ""));
    }

    #[test]
    fn empty_fields_produce_fixed_skeleton() {
        let lines = header_lines(&HeaderFields::default());
        assert_eq!(lines, vec![
            format!("HEADER    {:<39} {:<9} {:<17}", "", "", ""),
            format!("TITLE     {:<68}", ""),
            format!("COMPND    MOL_ID: 1;{}", " ".repeat(58)),
            format!("SOURCE    MOL_ID: 1;{}", " ".repeat(58)),
            format!("REMARK   1 SUPERPOSITION BY GTALIGN{}", " ".repeat(44)),
        ]);
    }

    #[test]
    fn header_line_truncates_each_field() {
        let fields = HeaderFields {
            classification: "C".repeat(45),
            deposition_date: "05-MAR-1999".into(),
            code: "X".repeat(20),
            ..Default::default()
        };
        let header = &header_lines(&fields)[0];
        assert_eq!(
            header,
            &format!("HEADER    {} 05-MAR-19 {}", "C".repeat(39), "X".repeat(17))
        );
        assert_eq!(header.len(), 77);
    }

    #[test]
    fn long_title_wraps_with_saturating_labels() {
        let title = "T".repeat(68 + 67 * 9 + 10);
        let fields = HeaderFields {
            title,
            ..Default::default()
        };
        let lines = header_lines(&fields);
        let titles: Vec<_> = lines.iter().filter(|l| l.starts_with("TITLE")).collect();

        assert_eq!(titles.len(), 11);
        assert_eq!(titles[0], &format!("TITLE     {}", "T".repeat(68)));
        let labels: Vec<_> = titles[1..].iter().map(|l| label(l)).collect();
        assert_eq!(labels, vec!["2", "3", "4", "5", "6", "7", "8", "9", "9", "9"]);
        assert_eq!(titles[10], &format!("TITLE    9 {:<67}", "T".repeat(10)));
    }

    #[test]
    fn compound_block_uses_its_own_counter() {
        let fields = HeaderFields {
            title: "T".repeat(200),
            compound: "M".repeat(60),
            ..Default::default()
        };
        let lines = header_lines(&fields);
        let compnd: Vec<_> = lines.iter().filter(|l| l.starts_with("COMPND")).collect();

        assert_eq!(compnd.len(), 3);
        assert_eq!(compnd[1], &format!("COMPND   2 MOLECULE: {}", "M".repeat(57)));
        assert_eq!(compnd[2], &format!("COMPND   3 {:<67}", "MMM"));
    }

    #[test]
    fn source_blocks_share_one_counter() {
        let fields = HeaderFields {
            organism_scientific: "S".repeat(50),
            organism_common: "HUMAN".into(),
            taxonomy_id: "9606".into(),
            ..Default::default()
        };
        let lines = header_lines(&fields);
        let source: Vec<_> = lines.iter().filter(|l| l.starts_with("SOURCE")).collect();

        assert_eq!(source.len(), 5);
        assert_eq!(
            source[1],
            &format!("SOURCE   2 ORGANISM_SCIENTIFIC: {}", "S".repeat(46))
        );
        assert_eq!(source[2], &format!("SOURCE   3 {:<67}", "SSSS"));
        assert_eq!(source[3], &format!("SOURCE   4 ORGANISM_COMMON: {:<50}", "HUMAN"));
        assert_eq!(source[4], &format!("SOURCE   5 ORGANISM_TAXID: {:<51}", "9606"));
    }

    #[test]
    fn taxonomy_alone_takes_first_label() {
        let fields = HeaderFields {
            taxonomy_id: "9606".into(),
            ..Default::default()
        };
        let lines = header_lines(&fields);
        assert!(lines.contains(&format!("SOURCE   2 ORGANISM_TAXID: {:<51}", "9606")));
    }
}

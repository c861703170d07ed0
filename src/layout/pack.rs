//! Row packing: width fractions in, a grid tree out.

use std::mem;

use super::document::{Column, ColumnContent, GRID_UNITS, LayoutDocument, Row};

/// Convert a width percentage to a grid span, rounding half up.
///
/// Fractions above 100 clamp to a full row. A fraction of 0 yields span 0,
/// accepted as written.
pub fn span_for(fraction: u8) -> u8 {
    let fraction = fraction.min(100);
    ((f64::from(fraction) / 100.0) * f64::from(GRID_UNITS)).round() as u8
}

/// Pack `(name, width_fraction)` pairs into rows of at most [`GRID_UNITS`]
/// spans, preserving input order.
///
/// An absent fraction means full width. Full-width fields always occupy a
/// row of their own.
pub fn pack<'a, I>(fields: I) -> LayoutDocument
where
    I: IntoIterator<Item = (&'a str, Option<u8>)>,
{
    let mut rows: Vec<Row> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();
    let mut accumulated: u16 = 0;
    let mut row_has_full = false;

    for (name, width) in fields {
        let fraction = width.unwrap_or(100).min(100);
        let span = span_for(fraction);

        // A row closes when the incoming span would overflow it, or when it
        // already holds a full-width member.
        let overflow = accumulated + u16::from(span) > u16::from(GRID_UNITS);
        if !columns.is_empty() && (overflow || row_has_full) {
            rows.push(Row {
                columns: mem::take(&mut columns),
            });
            accumulated = 0;
            row_has_full = false;
        }

        columns.push(Column {
            span,
            content: ColumnContent::Leaf(name.to_string()),
        });
        accumulated += u16::from(span);

        if fraction == 100 {
            row_has_full = true;
        }

        // Full-width fields never share: close the row right away.
        if row_has_full {
            rows.push(Row {
                columns: mem::take(&mut columns),
            });
            accumulated = 0;
            row_has_full = false;
        }
    }

    if !columns.is_empty() {
        rows.push(Row { columns });
    }

    LayoutDocument { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(doc: &LayoutDocument) -> Vec<Vec<u8>> {
        doc.rows
            .iter()
            .map(|row| row.columns.iter().map(|c| c.span).collect())
            .collect()
    }

    #[test]
    fn full_and_half_widths_pack_into_three_rows() {
        let doc = pack([
            ("a", Some(100)),
            ("b", Some(50)),
            ("c", Some(50)),
            ("d", Some(100)),
        ]);
        assert_eq!(spans(&doc), vec![vec![12], vec![6, 6], vec![12]]);
    }

    #[test]
    fn absent_fraction_means_full_width() {
        let doc = pack([("a", None), ("b", Some(50))]);
        assert_eq!(spans(&doc), vec![vec![12], vec![6]]);
    }

    #[test]
    fn overflow_starts_a_new_row() {
        let doc = pack([("a", Some(50)), ("b", Some(50)), ("c", Some(50))]);
        assert_eq!(spans(&doc), vec![vec![6, 6], vec![6]]);
    }

    #[test]
    fn thirds_fill_one_row() {
        let doc = pack([("a", Some(33)), ("b", Some(33)), ("c", Some(33))]);
        assert_eq!(spans(&doc), vec![vec![4, 4, 4]]);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(span_for(33), 4); // 3.96
        assert_eq!(span_for(50), 6);
        assert_eq!(span_for(20), 2); // 2.4
        assert_eq!(span_for(21), 3); // 2.52
        assert_eq!(span_for(96), 12); // 11.52
        assert_eq!(span_for(4), 0); // 0.48
        assert_eq!(span_for(0), 0);
    }

    #[test]
    fn near_full_span_does_not_force_isolation() {
        // 96% rounds to span 12 but is not full width, so a zero-span
        // neighbour may still join the row.
        let doc = pack([("a", Some(96)), ("b", Some(0))]);
        assert_eq!(spans(&doc), vec![vec![12, 0]]);
    }

    #[test]
    fn row_spans_never_exceed_grid_units() {
        let widths = [
            Some(25),
            Some(75),
            Some(60),
            Some(50),
            None,
            Some(10),
            Some(90),
            Some(100),
            Some(33),
        ];
        let names: Vec<String> = (0..widths.len()).map(|i| format!("f{i}")).collect();
        let doc = pack(names.iter().map(|n| n.as_str()).zip(widths));
        for row in &doc.rows {
            let total: u16 = row.columns.iter().map(|c| u16::from(c.span)).sum();
            assert!(total <= u16::from(GRID_UNITS), "row over 12: {total}");
        }
    }

    #[test]
    fn full_width_fields_sit_alone() {
        let doc = pack([("a", Some(50)), ("b", None), ("c", Some(50))]);
        assert_eq!(spans(&doc), vec![vec![6], vec![12], vec![6]]);
        for row in &doc.rows {
            if row.columns.iter().any(|c| c.span == 12) {
                assert_eq!(row.columns.len(), 1);
            }
        }
    }

    #[test]
    fn empty_input_packs_to_empty_document() {
        let doc = pack(std::iter::empty::<(&str, Option<u8>)>());
        assert!(doc.is_empty());
    }

    #[test]
    fn columns_reference_fields_in_order() {
        let doc = pack([("first", Some(50)), ("second", Some(50))]);
        let names: Vec<&str> = doc.rows[0]
            .columns
            .iter()
            .map(|c| match &c.content {
                ColumnContent::Leaf(name) => name.as_str(),
                ColumnContent::Rows(_) => unreachable!("packer emits leaves"),
            })
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}

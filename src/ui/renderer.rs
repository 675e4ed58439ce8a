//! Plain-text rendering of the browse view model.
//!
//! This module writes one frame of the browse screen to any [`io::Write`],
//! for the CLI driver. The renderer consumes a pre-computed
//! [`BrowseViewModel`] and contains no state logic of its own.
//!
//! # Output Shape
//!
//! ```text
//! keja [split] 2 of 5 listings (1 filter)
//! > Sunny [Loft] in Karen  KES 7,500  12 Riverside Dr, Nairobi
//!     1 bd / 1 ba / sleeps 2  4.6 (31 reviews)
//!   Garden cottage  KES 5,000  3 Lenana Rd, Nairobi
//!     2 bd / 1 ba / sleeps 4  4.2 (8 reviews)
//! map: 2 markers
//! recent: karen, westlands
//! ```
//!
//! Query matches in titles are bracketed; a clicked row is marked `*` and a
//! hovered row `>`.

use std::io;

use super::viewmodel::{BrowseViewModel, ListingRow};

/// Writes one frame of the browse screen.
///
/// Renders the header line, the loading or failure banner if one is active,
/// then the empty state or the list pane rows, the map pane summary for
/// whichever panes the view mode shows, and finally the recent-search echo.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render<W: io::Write>(vm: &BrowseViewModel, out: &mut W) -> io::Result<()> {
    let filters = match vm.header.active_filters {
        0 => String::new(),
        1 => " (1 filter)".to_string(),
        n => format!(" ({n} filters)"),
    };
    writeln!(
        out,
        "keja [{}] {} of {} listings{}",
        vm.header.mode_label, vm.header.shown, vm.header.total, filters
    )?;

    if vm.loading {
        writeln!(out, "loading listings...")?;
    }

    // Stale rows stay visible under the banner so a failed refresh never
    // blanks a screen the user was already browsing.
    if let Some(banner) = &vm.error_banner {
        writeln!(out, "error: {} (r to retry)", banner.message)?;
    }

    if let Some(empty) = &vm.empty_state {
        writeln!(out, "{}", empty.message)?;
        writeln!(out, "{}", empty.subtitle)?;
    } else if vm.show_list {
        for row in &vm.rows {
            render_row(row, out)?;
        }
    }

    if vm.show_map {
        writeln!(out, "map: {} markers", vm.marker_count)?;
    }

    if !vm.recents.is_empty() {
        writeln!(out, "recent: {}", vm.recents.join(", "))?;
    }

    Ok(())
}

/// Writes one listing row with its selection mark and capacity line.
fn render_row<W: io::Write>(row: &ListingRow, out: &mut W) -> io::Result<()> {
    let mark = if row.is_clicked {
        '*'
    } else if row.is_selected {
        '>'
    } else {
        ' '
    };

    writeln!(
        out,
        "{} {}  {}  {}",
        mark,
        highlighted(&row.title, &row.highlight_ranges),
        row.price_label,
        row.location_label
    )?;
    writeln!(out, "    {}  {}", row.meta_label, row.rating_label)
}

/// Brackets the given character ranges of `text`.
///
/// Ranges are `(start, end)` character indices, end exclusive, and must be
/// sorted and non-overlapping, as the view model produces them.
fn highlighted(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + ranges.len() * 2);
    let mut next = ranges.iter().peekable();
    for (i, c) in text.chars().enumerate() {
        if let Some(&&(start, _)) = next.peek() {
            if i == start {
                result.push('[');
            }
        }
        result.push(c);
        if let Some(&&(_, end)) = next.peek() {
            if i + 1 == end {
                result.push(']');
                next.next();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{EmptyState, ErrorBanner, HeaderInfo};
    use crate::domain::listing::ListingId;

    fn rendered(vm: &BrowseViewModel) -> String {
        let mut out = Vec::new();
        render(vm, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn base_vm() -> BrowseViewModel {
        BrowseViewModel {
            header: HeaderInfo {
                mode_label: "split",
                shown: 1,
                total: 3,
                active_filters: 2,
            },
            rows: vec![ListingRow {
                id: ListingId::new("a"),
                title: "Sunny Loft in Karen".to_string(),
                price_label: "KES 7,500".to_string(),
                location_label: "12 Riverside Dr, Nairobi".to_string(),
                meta_label: "1 bd / 1 ba / sleeps 2".to_string(),
                rating_label: "4.6 (31 reviews)".to_string(),
                is_selected: false,
                is_clicked: false,
                highlight_ranges: vec![(6, 10)],
            }],
            show_list: true,
            show_map: true,
            marker_count: 1,
            loading: false,
            error_banner: None,
            empty_state: None,
            recents: vec!["karen".to_string(), "westlands".to_string()],
        }
    }

    #[test]
    fn full_frame_has_header_rows_map_and_recents() {
        let text = rendered(&base_vm());
        assert!(text.starts_with("keja [split] 1 of 3 listings (2 filters)\n"));
        assert!(text.contains("  Sunny [Loft] in Karen  KES 7,500  12 Riverside Dr, Nairobi\n"));
        assert!(text.contains("    1 bd / 1 ba / sleeps 2  4.6 (31 reviews)\n"));
        assert!(text.contains("map: 1 markers\n"));
        assert!(text.ends_with("recent: karen, westlands\n"));
    }

    #[test]
    fn selection_marks_render_per_row() {
        let mut vm = base_vm();
        vm.rows[0].is_selected = true;
        assert!(rendered(&vm).contains("\n> Sunny"));

        vm.rows[0].is_clicked = true;
        assert!(rendered(&vm).contains("\n* Sunny"));
    }

    #[test]
    fn loading_line_precedes_the_row_area() {
        let mut vm = base_vm();
        vm.loading = true;
        let text = rendered(&vm);
        assert!(text.contains("loading listings...\n"));
    }

    #[test]
    fn failure_banner_keeps_stale_rows_visible() {
        let mut vm = base_vm();
        vm.error_banner = Some(ErrorBanner {
            message: "connection refused".to_string(),
        });
        let text = rendered(&vm);
        assert!(text.contains("error: connection refused (r to retry)\n"));
        assert!(text.contains("Sunny"));
        assert!(text.contains("map:"));
    }

    #[test]
    fn empty_state_renders_message_and_subtitle() {
        let mut vm = base_vm();
        vm.rows.clear();
        vm.header.shown = 0;
        vm.empty_state = Some(EmptyState {
            message: "No listings match your filters".to_string(),
            subtitle: "Adjust or reset your filters to see more".to_string(),
        });
        let text = rendered(&vm);
        assert!(text.contains("No listings match your filters\n"));
        assert!(text.contains("Adjust or reset your filters to see more\n"));
    }

    #[test]
    fn map_only_mode_skips_the_list_pane() {
        let mut vm = base_vm();
        vm.show_list = false;
        let text = rendered(&vm);
        assert!(!text.contains("Sunny"));
        assert!(text.contains("map: 1 markers"));
    }

    #[test]
    fn highlighted_brackets_every_range() {
        assert_eq!(highlighted("Sunny loft", &[(6, 10)]), "Sunny [loft]");
        assert_eq!(highlighted("loft loft", &[(0, 4), (5, 9)]), "[loft] [loft]");
        assert_eq!(highlighted("plain", &[]), "plain");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use unicode_width::UnicodeWidthStr;

use crate::frame::Frame;

const ROW_NUMBER_HEADER: &str = "#";

/// For multi-line strings, the width of the longest line.
fn display_width(s: &str) -> usize {
	if s.contains('\n') {
		s.lines().map(|line| line.width()).max().unwrap_or(0)
	} else {
		s.width()
	}
}

fn escape_control_chars(s: &str) -> String {
	s.replace('\n', "\\n").replace('\t', "\\t")
}

fn centered(s: &str, width: usize) -> String {
	let pad = width - display_width(s);
	let l = pad / 2;
	let r = pad - l;
	format!(" {:left$}{}{:right$} ", "", s, "", left = l, right = r)
}

impl Display for Frame {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let with_row_numbers = !self.row_numbers.is_empty();

		let mut header = Vec::with_capacity(self.columns.len() + 1);
		if with_row_numbers {
			header.push(ROW_NUMBER_HEADER.to_string());
		}
		header.extend(self.columns.iter().map(|c| c.name.clone()));

		let cells: Vec<Vec<String>> = (0..self.rows)
			.map(|row_idx| {
				let mut row = Vec::with_capacity(header.len());
				if with_row_numbers {
					row.push(self.row_numbers[row_idx].to_string());
				}
				row.extend(self.columns.iter().map(|c| escape_control_chars(&c.as_string(row_idx))));
				row
			})
			.collect();

		let mut col_widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
		for row in &cells {
			for (idx, s) in row.iter().enumerate() {
				col_widths[idx] = col_widths[idx].max(display_width(s));
			}
		}

		// Add padding
		for w in &mut col_widths {
			*w += 2;
		}

		let sep = format!("+{}+", col_widths.iter().map(|w| "-".repeat(*w + 2)).collect::<Vec<_>>().join("+"));
		writeln!(f, "{}", sep)?;

		let header = header.iter().zip(&col_widths).map(|(h, w)| centered(h, *w)).collect::<Vec<_>>();
		writeln!(f, "|{}|", header.join("|"))?;
		writeln!(f, "{}", sep)?;

		for row in &cells {
			let row = row.iter().zip(&col_widths).map(|(s, w)| centered(s, *w)).collect::<Vec<_>>();
			writeln!(f, "|{}|", row.join("|"))?;
		}

		writeln!(f, "{}", sep)
	}
}

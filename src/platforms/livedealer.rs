//! livedealer.org table-limit page.
//!
//! The page carries one sortable table of live-casino studios; the fifth
//! cell of each body row is the roulette maximum bet.
//!
//! URL: https://www.livedealer.org/live-casino-games/table-bet-limits/

use scraper::Html;

use super::{markup, selector, TableLimitSource};
use crate::types::ScrapeError;

const URL: &str = "https://www.livedealer.org/live-casino-games/table-bet-limits/";
const NAME: &str = "livedealer";

const TABLE: &str = "table.sortable.responsive-table";
/// Zero-based cell index of the roulette max bet.
const MAX_BET_COLUMN: usize = 4;

pub struct LiveDealerSource;

impl TableLimitSource for LiveDealerSource {
    fn name(&self) -> &str {
        NAME
    }

    fn url(&self) -> &str {
        URL
    }

    fn extract(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let doc = Html::parse_document(html);
        let table_sel = selector(NAME, TABLE)?;
        let row_sel = selector(NAME, "tr")?;
        let cell_sel = selector(NAME, "td")?;

        let table = doc
            .select(&table_sel)
            .next()
            .ok_or_else(|| markup(NAME, format!("no element matches {TABLE:?}")))?;

        let mut limits = Vec::new();
        // First row is the header.
        for (i, row) in table.select(&row_sel).enumerate().skip(1) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            let cell = cells.get(MAX_BET_COLUMN).ok_or_else(|| {
                markup(
                    NAME,
                    format!("row {i} has {} cells, expected at least {}", cells.len(), MAX_BET_COLUMN + 1),
                )
            })?;
            // Pieces are trimmed individually and joined without separators.
            limits.push(cell.text().map(str::trim).collect::<String>());
        }
        Ok(limits)
    }
}

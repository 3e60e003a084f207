//! roulette77.us betting-limits article.
//!
//! The article's comparison table ends with a row of maximum bets; cells
//! 2, 4 and 6 of that row hold the three table tiers.
//!
//! URL: https://roulette77.us/blog/explanation-of-betting-limits

use scraper::Html;

use super::{markup, selector, TableLimitSource};
use crate::types::ScrapeError;

const URL: &str = "https://roulette77.us/blog/explanation-of-betting-limits";
const NAME: &str = "roulette77";

const TABLE: &str = "table.classic-table.classic-table--min600";
const LIMIT_COLUMNS: [usize; 3] = [2, 4, 6];

pub struct Roulette77Source;

impl TableLimitSource for Roulette77Source {
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
        let last_row = table
            .select(&row_sel)
            .last()
            .ok_or_else(|| markup(NAME, "table has no rows"))?;
        let cells: Vec<_> = last_row.select(&cell_sel).collect();

        LIMIT_COLUMNS
            .iter()
            .map(|&col| {
                cells
                    .get(col)
                    .map(|cell| cell.text().collect::<String>().trim().to_string())
                    .ok_or_else(|| {
                        markup(NAME, format!("last row has {} cells, missing column {col}", cells.len()))
                    })
            })
            .collect()
    }
}

use crate::domain::model::Bean;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const PAGE_SIZES: [u32; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_TABLE_PAGE_SIZE: u32 = 10;
const DESCRIPTION_PREVIEW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    BeanId,
    Image,
    FlavorName,
    Description,
    ColorGroup,
    Ingredients,
    GlutenFree,
    SugarFree,
    Seasonal,
    Kosher,
}

/// Typed value of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Id(i64),
    Text(&'a str),
    List(&'a [String]),
    Flag(bool),
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::BeanId,
        Column::Image,
        Column::FlavorName,
        Column::Description,
        Column::ColorGroup,
        Column::Ingredients,
        Column::GlutenFree,
        Column::SugarFree,
        Column::Seasonal,
        Column::Kosher,
    ];

    /// Columns of the bean listing, in display order.
    pub const LISTING: [Column; 7] = [
        Column::FlavorName,
        Column::Description,
        Column::ColorGroup,
        Column::GlutenFree,
        Column::SugarFree,
        Column::Seasonal,
        Column::Kosher,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Column::BeanId => "BeanId",
            Column::Image => "ImageUrl",
            Column::FlavorName => "FlavorName",
            Column::Description => "Description",
            Column::ColorGroup => "ColorGroup",
            Column::Ingredients => "Ingredients",
            Column::GlutenFree => "GlutenFree",
            Column::SugarFree => "SugarFree",
            Column::Seasonal => "Seasonal",
            Column::Kosher => "Kosher",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::BeanId => "Id",
            Column::Image => "Image",
            Column::FlavorName => "Name",
            Column::Description => "Description",
            Column::ColorGroup => "Color",
            Column::Ingredients => "Ingredients",
            Column::GlutenFree => "Gluten Free",
            Column::SugarFree => "Sugar Free",
            Column::Seasonal => "Seasonal",
            Column::Kosher => "Kosher",
        }
    }

    pub fn cell<'a>(&self, bean: &'a Bean) -> Cell<'a> {
        match self {
            Column::BeanId => Cell::Id(bean.bean_id),
            Column::Image => Cell::Text(&bean.image_url),
            Column::FlavorName => Cell::Text(&bean.flavor_name),
            Column::Description => Cell::Text(&bean.description),
            Column::ColorGroup => Cell::Text(&bean.color_group),
            Column::Ingredients => Cell::List(&bean.ingredients),
            Column::GlutenFree => Cell::Flag(bean.gluten_free),
            Column::SugarFree => Cell::Flag(bean.sugar_free),
            Column::Seasonal => Cell::Flag(bean.seasonal),
            Column::Kosher => Cell::Flag(bean.kosher),
        }
    }

    /// Raw text of the cell, used for filtering and export.
    pub fn text(&self, bean: &Bean) -> String {
        match self.cell(bean) {
            Cell::Id(id) => id.to_string(),
            Cell::Text(s) => s.to_string(),
            Cell::List(items) => items.join(", "),
            Cell::Flag(flag) => flag.to_string(),
        }
    }

    /// Display text of the cell.
    pub fn display(&self, bean: &Bean) -> String {
        match (self, self.cell(bean)) {
            (Column::Description, Cell::Text(s)) => preview(s),
            (_, Cell::Flag(true)) => "yes".to_string(),
            (_, Cell::Flag(false)) => "-".to_string(),
            _ => self.text(bean),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
        Column::ALL
            .into_iter()
            .find(|c| {
                c.key().to_ascii_lowercase() == wanted
                    || c.label().to_ascii_lowercase().replace(' ', "") == wanted
            })
            .ok_or_else(|| format!("unknown column '{}'", s))
    }
}

fn preview(description: &str) -> String {
    if description.is_empty() {
        return "No description".to_string();
    }
    if description.chars().count() > DESCRIPTION_PREVIEW {
        let cut: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

fn compare_cells(a: &Cell<'_>, b: &Cell<'_>) -> Ordering {
    match (a, b) {
        (Cell::Id(x), Cell::Id(y)) => x.cmp(y),
        (Cell::Flag(x), Cell::Flag(y)) => x.cmp(y),
        (Cell::Text(x), Cell::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Cell::List(x), Cell::List(y)) => x
            .join(",")
            .to_lowercase()
            .cmp(&y.join(",").to_lowercase()),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    /// Next state when a header is clicked: ascending, descending, cleared.
    pub fn toggle(current: Option<SortState>, column: Column) -> Option<SortState> {
        match current {
            Some(SortState {
                column: c,
                direction: SortDirection::Asc,
            }) if c == column => Some(SortState {
                column,
                direction: SortDirection::Desc,
            }),
            Some(SortState {
                column: c,
                direction: SortDirection::Desc,
            }) if c == column => None,
            _ => Some(SortState {
                column,
                direction: SortDirection::Asc,
            }),
        }
    }
}

impl FromStr for SortState {
    type Err = String;

    /// `column`, `column:asc` or `column:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    other => return Err(format!("unknown sort direction '{}'", other)),
                };
                (column, direction)
            }
            None => (s, SortDirection::Asc),
        };
        Ok(SortState {
            column: column.parse()?,
            direction,
        })
    }
}

/// Stable sort of the rows by one column.
pub fn sort_beans(beans: &mut [Bean], sort: SortState) {
    beans.sort_by(|a, b| {
        let ord = compare_cells(&sort.column.cell(a), &sort.column.cell(b));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Case-insensitive substring search over every column.
pub fn filter_beans<'a>(beans: &'a [Bean], query: &str) -> Vec<&'a Bean> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return beans.iter().collect();
    }
    beans
        .iter()
        .filter(|bean| {
            Column::ALL
                .iter()
                .any(|c| c.text(bean).to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_TABLE_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u32 {
        self.page_index.saturating_mul(self.page_size)
    }

    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size.max(1)))
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: u64) -> bool {
        u64::from(self.page_index) + 1 < self.page_count(total)
    }

    pub fn first(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self
        }
    }

    pub fn next(self, total: u64) -> Self {
        if self.can_next(total) {
            Self {
                page_index: self.page_index + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn last(self, total: u64) -> Self {
        let last = self.page_count(total).saturating_sub(1);
        Self {
            page_index: u32::try_from(last).unwrap_or(u32::MAX),
            ..self
        }
    }

    /// Changing the page size returns to the first page.
    pub fn with_page_size(self, page_size: u32) -> Self {
        Self::new(0, page_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "grid" => Ok(ViewMode::Grid),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

/// Plain-text table with a header row and padded columns.
pub fn render_table(beans: &[&Bean], columns: &[Column]) -> String {
    let rows: Vec<Vec<String>> = beans
        .iter()
        .map(|bean| columns.iter().map(|c| c.display(bean)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.label().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(columns.iter().map(|c| c.label().to_string()).collect())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(rows.into_iter().map(line));
    out.join("\n")
}

/// One card per bean: name, preview and the attributes it carries.
pub fn render_grid(beans: &[&Bean]) -> String {
    beans
        .iter()
        .map(|bean| {
            let tags: Vec<&str> = [
                (bean.gluten_free, "Gluten Free"),
                (bean.kosher, "Kosher"),
                (bean.seasonal, "Seasonal"),
                (bean.sugar_free, "Sugar Free"),
            ]
            .into_iter()
            .filter_map(|(on, label)| on.then_some(label))
            .collect();
            format!(
                "[{}] {}\n    {}\n    {}",
                bean.bean_id,
                bean.flavor_name,
                preview(&bean.description),
                if tags.is_empty() {
                    "-".to_string()
                } else {
                    tags.join(", ")
                }
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// CSV export of the given columns, keyed by API field name.
pub fn write_csv<W: std::io::Write>(
    writer: W,
    beans: &[&Bean],
    columns: &[Column],
) -> crate::utils::error::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|c| c.key()))?;
    for bean in beans {
        wtr.write_record(columns.iter().map(|c| c.text(bean)))?;
    }
    wtr.flush()?;
    Ok(())
}

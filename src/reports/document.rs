//! Archive document builder
//!
//! Turns aggregated month groups plus letterhead data into a paginated
//! document description. The description is renderer-neutral: it names
//! page setup, running header and footer, content blocks and styles, and a
//! [`DocumentRenderer`](crate::export::DocumentRenderer) turns it into bytes.

use serde::Serialize;
use std::collections::BTreeMap;

use super::aggregate::{aggregate_request, AggregatedMonth};
use crate::i18n::{Language, Translator};
use crate::models::{
    CanonicalDate, DateFormat, ExportRequest, LetterheadInfo, Money, RoundingPolicy, Transaction,
};

/// Page margins and block margins: left, top, right, bottom
pub type Margin = [u16; 4];

pub const PAGE_MARGINS: Margin = [40, 110, 40, 60];
pub const HEADER_MARGINS: Margin = [40, 40, 40, 0];
pub const LOGO_SIZE: u16 = 60;
pub const POSITIVE_COLOR: &str = "#2e8033";
pub const NEGATIVE_COLOR: &str = "#9c3f36";
pub const MUTED_COLOR: &str = "#777";
pub const TABLE_HEADER_FILL: &str = "#eeeeee";

/// Placeholders the renderer replaces with live page numbers
pub const CURRENT_PAGE: &str = "{current_page}";
pub const PAGE_COUNT: &str = "{page_count}";

pub const STYLE_HEADER: &str = "header";
pub const STYLE_SUBHEADER: &str = "subheader";
pub const STYLE_TABLE_HEADER: &str = "tableHeader";

/// Presentation settings passed explicitly into every build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub currency_symbol: String,
    pub date_format: DateFormat,
    pub language: Language,
    pub rounding: RoundingPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            date_format: DateFormat::default(),
            language: Language::default(),
            rounding: RoundingPolicy::default(),
        }
    }
}

impl ReportConfig {
    /// `€12.50`, sign dropped
    pub fn amount(&self, money: Money) -> String {
        money.format_magnitude(&self.currency_symbol, self.rounding)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageSize {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Column width: `*` takes the remaining space, `auto` fits the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Width {
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "auto")]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBreak {
    Before,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableLayout {
    LightHorizontalLines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderColumn {
    Text {
        text: String,
        #[serde(rename = "fontSize")]
        font_size: u16,
        width: Width,
    },
    Spacer {
        width: Width,
    },
    Image {
        /// `data:` URL
        image: String,
        width: u16,
        height: u16,
        alignment: Alignment,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningHeader {
    pub margin: Margin,
    pub columns: Vec<HeaderColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterText {
    pub text: String,
    pub font_size: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    pub margin: Margin,
}

/// Print date on the left, page counter on the right
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningFooter {
    pub left: FooterText,
    pub right: FooterText,
}

impl RunningFooter {
    /// Page counter text with the placeholders substituted
    pub fn page_text(&self, current: usize, count: usize) -> String {
        self.right
            .text
            .replace(CURRENT_PAGE, &current.to_string())
            .replace(PAGE_COUNT, &count.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break: Option<PageBreak>,
}

impl TextBlock {
    fn styled(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(STYLE_TABLE_HEADER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub header_rows: usize,
    pub widths: Vec<Width>,
    pub body: Vec<Vec<Cell>>,
    pub layout: TableLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text(TextBlock),
    Table(TableBlock),
}

impl Block {
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Self::Text(text) => Some(text),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,
}

/// A complete, renderer-neutral document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub page_size: PageSize,
    pub page_margins: Margin,
    pub header: RunningHeader,
    pub footer: RunningFooter,
    pub content: Vec<Block>,
    pub styles: BTreeMap<&'static str, Style>,
}

impl DocumentDefinition {
    /// Number of blocks that start a new page
    pub fn page_breaks(&self) -> usize {
        self.content
            .iter()
            .filter_map(Block::as_text)
            .filter(|t| t.page_break.is_some())
            .count()
    }

    /// Titles of all `header` styled blocks, in order
    pub fn section_titles(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(Block::as_text)
            .filter(|t| t.style == Some(STYLE_HEADER))
            .map(|t| t.text.as_str())
            .collect()
    }
}

fn default_styles() -> BTreeMap<&'static str, Style> {
    let mut styles = BTreeMap::new();
    styles.insert(
        STYLE_HEADER,
        Style {
            font_size: Some(16),
            bold: true,
            margin: Some([0, 20, 0, 10]),
            fill_color: None,
        },
    );
    styles.insert(
        STYLE_SUBHEADER,
        Style {
            font_size: Some(13),
            bold: true,
            margin: Some([0, 10, 0, 5]),
            fill_color: None,
        },
    );
    styles.insert(
        STYLE_TABLE_HEADER,
        Style {
            bold: true,
            fill_color: Some(TABLE_HEADER_FILL),
            ..Default::default()
        },
    );
    styles
}

/// Builds archive documents for one configuration
pub struct DocumentBuilder {
    config: ReportConfig,
    translator: Translator,
    print_date: CanonicalDate,
}

impl DocumentBuilder {
    pub fn new(config: ReportConfig) -> Self {
        let translator = Translator::new(config.language);
        Self {
            config,
            translator,
            print_date: CanonicalDate::today(),
        }
    }

    /// Override the generation date printed in the footer
    pub fn with_print_date(mut self, print_date: CanonicalDate) -> Self {
        self.print_date = print_date;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn build(&self, request: &ExportRequest, letterhead: &LetterheadInfo) -> DocumentDefinition {
        let months = aggregate_request(request);

        let content = if months.is_empty() {
            vec![Block::Text(TextBlock {
                alignment: Some(Alignment::Center),
                margin: Some([0, 100, 0, 0]),
                ..TextBlock::styled(
                    format!(
                        "{} {}",
                        self.translator.t("archive.no_transactions_in_year"),
                        request.year
                    ),
                    STYLE_HEADER,
                )
            })]
        } else {
            months
                .iter()
                .enumerate()
                .flat_map(|(index, month)| self.month_section(&request.year, month, index > 0))
                .collect()
        };

        DocumentDefinition {
            page_size: PageSize::A4,
            page_margins: PAGE_MARGINS,
            header: self.header(letterhead),
            footer: self.footer(),
            content,
            styles: default_styles(),
        }
    }

    fn header(&self, letterhead: &LetterheadInfo) -> RunningHeader {
        let mut columns = Vec::with_capacity(3);
        if letterhead.has_name() {
            columns.push(HeaderColumn::Text {
                text: letterhead.address_block(),
                font_size: 10,
                width: Width::Auto,
            });
        }
        columns.push(HeaderColumn::Spacer { width: Width::Star });
        if let Some(logo) = &letterhead.logo {
            columns.push(HeaderColumn::Image {
                image: logo.data_url(),
                width: LOGO_SIZE,
                height: LOGO_SIZE,
                alignment: Alignment::Right,
            });
        }
        RunningHeader {
            margin: HEADER_MARGINS,
            columns,
        }
    }

    fn footer(&self) -> RunningFooter {
        RunningFooter {
            left: FooterText {
                text: format!("{}: {}", self.translator.t("archive.print_date"), self.print_date),
                font_size: 9,
                alignment: None,
                margin: [40, 20, 0, 10],
            },
            right: FooterText {
                text: format!(
                    "{} {} / {}",
                    self.translator.t("archive.page"),
                    CURRENT_PAGE,
                    PAGE_COUNT
                ),
                font_size: 9,
                alignment: Some(Alignment::Right),
                margin: [0, 20, 40, 10],
            },
        }
    }

    fn month_section(&self, year: &str, month: &AggregatedMonth, page_break: bool) -> Vec<Block> {
        let month_name = match month.month_number {
            Some(number) => self.translator.month_name(number),
            None => month.month.clone(),
        };

        let mut blocks = vec![Block::Text(TextBlock {
            page_break: page_break.then_some(PageBreak::Before),
            ..TextBlock::styled(format!("{} {}", month_name, year), STYLE_HEADER)
        })];

        let totals = month.totals;
        self.push_side(
            &mut blocks,
            &month.income,
            "transaction_list.income",
            "transaction_list.no_income_transactions",
            format!(
                "{}: {}",
                self.translator.t("archive.total_income"),
                self.config.amount(totals.income)
            ),
            "",
        );
        self.push_side(
            &mut blocks,
            &month.expenses,
            "transaction_list.expenses",
            "transaction_list.no_expense_transactions",
            format!(
                "{}: -{}",
                self.translator.t("archive.total_expenses"),
                self.config.amount(totals.expenses)
            ),
            "-",
        );

        let (sign, color) = if totals.is_non_negative() {
            ("+", POSITIVE_COLOR)
        } else {
            ("-", NEGATIVE_COLOR)
        };
        blocks.push(Block::Text(TextBlock {
            text: format!(
                "{}: {}{}",
                self.translator.t("archive.net_balance"),
                sign,
                self.config.amount(totals.net)
            ),
            font_size: Some(12),
            bold: true,
            color: Some(color),
            alignment: Some(Alignment::Right),
            margin: Some([0, 10, 0, 20]),
            ..Default::default()
        }));

        blocks
    }

    fn push_side(
        &self,
        blocks: &mut Vec<Block>,
        transactions: &[Transaction],
        title_key: &str,
        empty_key: &str,
        total_line: String,
        amount_prefix: &str,
    ) {
        if transactions.is_empty() {
            blocks.push(Block::Text(TextBlock {
                text: self.translator.t(empty_key),
                font_size: Some(11),
                color: Some(MUTED_COLOR),
                margin: Some([0, 5, 0, 10]),
                ..Default::default()
            }));
            return;
        }

        blocks.push(Block::Text(TextBlock::styled(
            self.translator.t(title_key),
            STYLE_SUBHEADER,
        )));

        let mut body = vec![vec![
            Cell::header(self.translator.t("archive.description")),
            Cell::header(self.translator.t("archive.date")),
            Cell::header(self.translator.t("archive.amount")),
        ]];
        body.extend(transactions.iter().map(|txn| {
            vec![
                Cell::plain(txn.description.clone()),
                Cell::plain(txn.date.to_display(self.config.date_format)),
                Cell::plain(format!("{}{}", amount_prefix, self.config.amount(txn.amount))),
            ]
        }));

        blocks.push(Block::Table(TableBlock {
            header_rows: 1,
            widths: vec![Width::Star, Width::Auto, Width::Auto],
            body,
            layout: TableLayout::LightHorizontalLines,
        }));

        blocks.push(Block::Text(TextBlock {
            text: total_line,
            font_size: Some(11),
            bold: true,
            alignment: Some(Alignment::Right),
            margin: Some([0, 5, 0, 15]),
            ..Default::default()
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportScope, LogoImage, MonthGroup, TransactionType};

    fn txn(day: u32, month: u32, desc: &str, cents: i64, kind: TransactionType) -> Transaction {
        Transaction::new(
            CanonicalDate::from_ymd(2024, month, day).unwrap(),
            desc,
            kind.signed(Money::from_cents(cents)),
            kind,
        )
    }

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(ReportConfig::default())
            .with_print_date(CanonicalDate::from_ymd(2025, 1, 2).unwrap())
    }

    fn july() -> MonthGroup {
        let mut group = MonthGroup::new("2024", "07");
        group.transactions = vec![
            txn(1, 7, "Salary", 300_000, TransactionType::Income),
            txn(15, 7, "Bonus", 50_000, TransactionType::Income),
            txn(20, 7, "Refund", 1_250, TransactionType::Income),
            txn(3, 7, "Rent", 120_000, TransactionType::Expense),
            txn(9, 7, "Groceries", 8_550, TransactionType::Expense),
        ];
        group
    }

    fn texts(doc: &DocumentDefinition) -> Vec<&str> {
        doc.content
            .iter()
            .filter_map(Block::as_text)
            .map(|t| t.text.as_str())
            .collect()
    }

    #[test]
    fn test_single_month_section() {
        let request = ExportRequest::new(ExportScope::month("2024", "07"), vec![july()]);
        let doc = builder().build(&request, &LetterheadInfo::default());

        assert_eq!(doc.section_titles(), vec!["July 2024"]);
        assert_eq!(doc.page_breaks(), 0);
        assert_eq!(
            texts(&doc),
            vec![
                "July 2024",
                "Income",
                "Total income: €3512.50",
                "Expenses",
                "Total expenses: -€1285.50",
                "Net balance: +€2227.00",
            ]
        );

        let income = doc.content[2].as_table().unwrap();
        assert_eq!(income.body.len(), 4);
        assert_eq!(income.body[0][0].style, Some(STYLE_TABLE_HEADER));
        assert_eq!(income.body[1][0].text, "Refund");
        assert_eq!(income.body[1][1].text, "20/07/2024");
        assert_eq!(income.body[1][2].text, "€12.50");

        let expenses = doc.content[5].as_table().unwrap();
        assert_eq!(expenses.body[1][2].text, "-€85.50");
        assert_eq!(expenses.widths, vec![Width::Star, Width::Auto, Width::Auto]);

        let net = doc.content.last().unwrap().as_text().unwrap();
        assert_eq!(net.color, Some(POSITIVE_COLOR));
        assert!(net.bold);
    }

    #[test]
    fn test_negative_net_and_placeholders() {
        let mut group = MonthGroup::new("2024", "3");
        group.transactions = vec![txn(5, 3, "Rent", 10_000, TransactionType::Expense)];
        let request = ExportRequest::new(ExportScope::year("2024"), vec![group]);
        let doc = builder().build(&request, &LetterheadInfo::default());

        assert_eq!(
            texts(&doc),
            vec![
                "March 2024",
                "No income transactions",
                "Expenses",
                "Total expenses: -€100.00",
                "Net balance: -€100.00",
            ]
        );
        let placeholder = doc.content[1].as_text().unwrap();
        assert_eq!(placeholder.color, Some(MUTED_COLOR));
        assert_eq!(doc.content.last().unwrap().as_text().unwrap().color, Some(NEGATIVE_COLOR));
    }

    #[test]
    fn test_zero_net_is_positive() {
        let mut group = MonthGroup::new("2024", "1");
        group.transactions = vec![
            txn(1, 1, "In", 500, TransactionType::Income),
            txn(2, 1, "Out", 500, TransactionType::Expense),
        ];
        let request = ExportRequest::new(ExportScope::year("2024"), vec![group]);
        let doc = builder().build(&request, &LetterheadInfo::default());
        let net = doc.content.last().unwrap().as_text().unwrap();
        assert_eq!(net.text, "Net balance: +€0.00");
        assert_eq!(net.color, Some(POSITIVE_COLOR));
    }

    #[test]
    fn test_page_break_before_every_later_month() {
        let mut feb = MonthGroup::new("2024", "2");
        feb.transactions = vec![txn(1, 2, "a", 100, TransactionType::Income)];
        let mut mar = MonthGroup::new("2024", "3");
        mar.transactions = vec![txn(1, 3, "b", 100, TransactionType::Income)];
        let request = ExportRequest::new(
            ExportScope::year("2024"),
            vec![feb, MonthGroup::new("2024", "4"), mar, july()],
        );
        let doc = builder().build(&request, &LetterheadInfo::default());

        assert_eq!(
            doc.section_titles(),
            vec!["February 2024", "March 2024", "July 2024"]
        );
        assert_eq!(doc.page_breaks(), 2);
        assert!(doc.content[0].as_text().unwrap().page_break.is_none());
    }

    #[test]
    fn test_empty_scope_placeholder_page() {
        let request = ExportRequest::new(ExportScope::year("2023"), vec![MonthGroup::new("2023", "1")]);
        let doc = builder().build(&request, &LetterheadInfo::default());

        assert_eq!(doc.content.len(), 1);
        let block = doc.content[0].as_text().unwrap();
        assert_eq!(block.text, "No transactions in year 2023");
        assert_eq!(block.alignment, Some(Alignment::Center));
        assert_eq!(block.margin, Some([0, 100, 0, 0]));
    }

    #[test]
    fn test_header_and_footer() {
        let letterhead = LetterheadInfo {
            name: "Jane Roe".into(),
            address: "Main St 1".into(),
            postal_code: "10115".into(),
            city: "Berlin".into(),
            logo: Some(LogoImage::new("image/png", vec![1, 2, 3])),
        };
        let request = ExportRequest::new(ExportScope::month("2024", "07"), vec![july()]);
        let doc = builder().build(&request, &letterhead);

        assert_eq!(doc.header.columns.len(), 3);
        assert!(matches!(
            &doc.header.columns[0],
            HeaderColumn::Text { text, font_size: 10, .. } if text == "Jane Roe\nMain St 1\n10115 Berlin"
        ));
        assert!(matches!(
            &doc.header.columns[2],
            HeaderColumn::Image { width: 60, height: 60, alignment: Alignment::Right, .. }
        ));

        assert_eq!(doc.footer.left.text, "Print date: 02.01.2025");
        assert_eq!(doc.footer.page_text(2, 5), "Page 2 / 5");

        let without = builder().build(&request, &LetterheadInfo::default());
        assert_eq!(without.header.columns, vec![HeaderColumn::Spacer { width: Width::Star }]);
    }

    #[test]
    fn test_config_drives_labels_and_formats() {
        let config = ReportConfig {
            currency_symbol: "$".into(),
            date_format: DateFormat::YearMonthDay,
            language: Language::De,
            rounding: RoundingPolicy::HalfAwayFromZero,
        };
        let request = ExportRequest::new(ExportScope::month("2024", "07"), vec![july()]);
        let doc = DocumentBuilder::new(config).build(&request, &LetterheadInfo::default());

        assert_eq!(doc.section_titles(), vec!["Juli 2024"]);
        let income = doc.content[2].as_table().unwrap();
        assert_eq!(income.body[0][0].text, "Beschreibung");
        assert_eq!(income.body[1][1].text, "2024-07-20");
        assert_eq!(income.body[1][2].text, "$12.50");
    }

    #[test]
    fn test_serialized_shape() {
        let request = ExportRequest::new(ExportScope::month("2024", "07"), vec![july()]);
        let doc = builder().build(&request, &LetterheadInfo::default());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["pageSize"], "A4");
        assert_eq!(value["pageMargins"], serde_json::json!([40, 110, 40, 60]));
        assert_eq!(value["styles"]["header"]["fontSize"], 16);
        assert_eq!(value["styles"]["tableHeader"]["fillColor"], "#eeeeee");
        assert_eq!(value["content"][2]["kind"], "table");
        assert_eq!(value["content"][2]["layout"], "lightHorizontalLines");
        assert_eq!(value["content"][2]["widths"], serde_json::json!(["*", "auto", "auto"]));
    }
}

//! Visitor exports.
//!
//! Builds spreadsheet and CSV downloads and the WhatsApp summary message.
//! Everything here is pure: callers pass the export time and decide where
//! the bytes go.

use chrono::{DateTime, Local};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_xlsxwriter::{Format, Workbook};

use crate::domain::models::TIMESTAMP_FORMAT;
use crate::domain::{digits_only, AppError, Notification, Result, Visitor};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SHEET_NAME: &str = "Visitantes";

const SPREADSHEET_HEADERS: [&str; 7] = [
    "Data do Culto",
    "Horário",
    "Nome Completo",
    "Telefone",
    "Cidade",
    "Observações",
    "Cadastrado em",
];

const CSV_HEADER: &str = "Dados dos Visitantes";

const MESSAGE_TITLE: &str = "*Lista de Visitantes da Igreja*";

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Spreadsheet,
    Csv,
}

impl ExportKind {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" | "planilha" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown export format: {s}. Use: xlsx, csv")),
        }
    }
}

/// A generated file ready to be downloaded.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub kind: ExportKind,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

impl ExportFile {
    /// Notification raised once the file has been saved.
    #[must_use]
    pub fn notification(&self) -> Notification {
        let title = match self.kind {
            ExportKind::Spreadsheet => "Planilha exportada!",
            ExportKind::Csv => "CSV exportado!",
        };
        Notification::success(
            title,
            format!("Arquivo {} baixado com sucesso.", self.file_name),
        )
    }
}

/// `visitantes_<dd-MM-yyyy_HH-mm>.<ext>`
#[must_use]
pub fn export_file_name(kind: ExportKind, now: DateTime<Local>) -> String {
    format!(
        "visitantes_{}.{}",
        now.format("%d-%m-%Y_%H-%M"),
        kind.extension()
    )
}

/// Generate a file of the given kind.
///
/// # Errors
/// Returns `NothingToExport` for an empty collection, or a generation error.
pub fn export(kind: ExportKind, records: &[&Visitor], now: DateTime<Local>) -> Result<ExportFile> {
    match kind {
        ExportKind::Spreadsheet => export_spreadsheet(records, now),
        ExportKind::Csv => export_csv(records, now),
    }
}

/// One row per visitor with explicit columns, as an `.xlsx` workbook.
///
/// # Errors
/// Returns `NothingToExport` for an empty collection, or `Spreadsheet` if
/// the workbook cannot be written.
pub fn export_spreadsheet(records: &[&Visitor], now: DateTime<Local>) -> Result<ExportFile> {
    if records.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, title) in (0u16..).zip(SPREADSHEET_HEADERS) {
            sheet.write_string_with_format(0, col, title, &header)?;
        }

        for (row, visitor) in (1u32..).zip(records) {
            let cells = [
                visitor.service_date.clone(),
                visitor.service_period(),
                visitor.full_name.clone(),
                visitor.phone.clone(),
                visitor.city.clone(),
                visitor.observations_or_placeholder().to_string(),
                visitor.created_at_display(),
            ];
            for (col, cell) in (0u16..).zip(cells) {
                sheet.write_string(row, col, cell)?;
            }
        }

        for (col, width) in (0u16..).zip([14, 14, 32, 18, 20, 40, 18]) {
            sheet.set_column_width(col, width)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;

    Ok(ExportFile {
        kind: ExportKind::Spreadsheet,
        file_name: export_file_name(ExportKind::Spreadsheet, now),
        bytes,
        rows: records.len(),
    })
}

/// A single quoted column holding each visitor's narrative block.
///
/// # Errors
/// Returns `NothingToExport` for an empty collection, or `Csv` if a row
/// cannot be written.
pub fn export_csv(records: &[&Visitor], now: DateTime<Local>) -> Result<ExportFile> {
    if records.is_empty() {
        return Err(AppError::NothingToExport);
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record([CSV_HEADER])?;
    for visitor in records {
        wtr.write_record([visitor.narrative()])?;
    }

    let mut bytes = wtr
        .into_inner()
        .map_err(|e| AppError::io("Failed to flush CSV", e.into_error()))?;
    // Rows are joined by newlines, with none after the last one.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    Ok(ExportFile {
        kind: ExportKind::Csv,
        file_name: export_file_name(ExportKind::Csv, now),
        bytes,
        rows: records.len(),
    })
}

/// A WhatsApp message ready to be opened.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// Destination, digits only.
    pub destination: String,
    pub text: String,
    /// `https://wa.me/<destination>?text=<encoded text>`
    pub url: String,
}

impl OutboundMessage {
    /// Notification raised once the link has been opened.
    #[must_use]
    pub fn notification() -> Notification {
        Notification::success("WhatsApp aberto!", "A mensagem foi preparada para envio.")
    }
}

/// Compose the visitor summary and the `wa.me` link that carries it.
///
/// # Errors
/// Returns `MissingDestination` if the number has no digits, then
/// `NothingToSend` for an empty collection.
pub fn build_outbound_message(
    records: &[&Visitor],
    destination: &str,
    now: DateTime<Local>,
) -> Result<OutboundMessage> {
    let destination = digits_only(destination);
    if destination.is_empty() {
        return Err(AppError::MissingDestination);
    }
    if records.is_empty() {
        return Err(AppError::NothingToSend);
    }

    let blocks: Vec<String> = records.iter().map(|v| message_block(v)).collect();

    let text = format!(
        "{MESSAGE_TITLE}\n\n{}\nTotal: {} visitante(s)\nRelatório gerado em {}",
        blocks.join("\n"),
        records.len(),
        now.format(TIMESTAMP_FORMAT)
    );

    let url = format!(
        "https://wa.me/{destination}?text={}",
        utf8_percent_encode(&text, URI_COMPONENT)
    );

    Ok(OutboundMessage {
        destination,
        text,
        url,
    })
}

fn message_block(visitor: &Visitor) -> String {
    format!(
        "*Culto {}: {}\nNome: {}\nFone: {}\nCidade: {}\nObs: {}\n",
        visitor.service_period(),
        visitor.service_date,
        visitor.full_name,
        visitor.phone,
        visitor.city,
        visitor.observations_or_placeholder()
    )
}

//! Category tables as a Word document (.docx).
//!
//! A DOCX file is a ZIP archive of Open XML parts; the tables live in
//! `word/document.xml`. Each category gets one ruled table whose first two
//! rows (the merged `Category: X` banner and the column header) repeat on
//! every page the table spans.

use super::{CategoryTable, ExportError, TableRenderer};
use crate::config::DocxConfig;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const TWIPS_PER_INCH: f64 = 1440.0;
/// US Letter height.
const PAGE_HEIGHT_TWIPS: u32 = 15840;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Writes category tables into a single-section Letter-sized document.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    layout: DocxConfig,
}

impl DocxRenderer {
    pub fn new(layout: DocxConfig) -> Self {
        Self { layout }
    }

    fn margin_twips(&self) -> u32 {
        inches_to_twips(self.layout.margin_in)
    }

    fn page_width_twips(&self) -> u32 {
        inches_to_twips(self.layout.page_width_in)
    }

    fn available_width_twips(&self) -> u32 {
        self.page_width_twips()
            .saturating_sub(2 * self.margin_twips())
    }

    fn styles_xml(&self) -> String {
        let font = escape(&self.layout.font);
        let size = half_points(self.layout.font_size_pt);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#
        )
    }

    fn document_xml(&self, tables: &[CategoryTable]) -> String {
        let mut body = String::new();
        for table in tables {
            self.write_table(&mut body, table);
            // spacer paragraph between tables
            body.push_str("<w:p/>");
        }

        let margin = self.margin_twips();
        let page_width = self.page_width_twips();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="{page_width}" w:h="{PAGE_HEIGHT_TWIPS}"/><w:pgMar w:top="{margin}" w:right="{margin}" w:bottom="{margin}" w:left="{margin}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
        )
    }

    fn write_table(&self, out: &mut String, table: &CategoryTable) {
        let columns = table.headers.len().max(1);
        let col_width = self.available_width_twips() / columns as u32;
        let table_width = col_width * columns as u32;
        let small = half_points(self.layout.table_font_size_pt);

        out.push_str("<w:tbl><w:tblPr>");
        let _ = write!(out, r#"<w:tblW w:w="{table_width}" w:type="dxa"/>"#);
        out.push_str(r#"<w:tblLayout w:type="fixed"/><w:tblBorders>"#);
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let _ = write!(
                out,
                r#"<w:{edge} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#
            );
        }
        out.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            let _ = write!(out, r#"<w:gridCol w:w="{col_width}"/>"#);
        }
        out.push_str("</w:tblGrid>");

        // Banner: one cell merged across every column.
        out.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr><w:tc><w:tcPr>");
        let _ = write!(
            out,
            r#"<w:tcW w:w="{table_width}" w:type="dxa"/><w:gridSpan w:val="{columns}"/>"#
        );
        out.push_str("</w:tcPr>");
        write_paragraph(out, &table.banner(), true, Some(small));
        out.push_str("</w:tc></w:tr>");

        out.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
        for header in &table.headers {
            write_cell(out, col_width, header, true, Some(small));
        }
        out.push_str("</w:tr>");

        for row in &table.rows {
            out.push_str("<w:tr>");
            for (i, value) in row.iter().enumerate() {
                // the color name keeps the document font size
                let size = if i == 0 { None } else { Some(small) };
                write_cell(out, col_width, value, false, size);
            }
            out.push_str("</w:tr>");
        }

        out.push_str("</w:tbl>");
    }
}

impl TableRenderer for DocxRenderer {
    fn render(&self, tables: &[CategoryTable]) -> Result<Vec<u8>, ExportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/styles.xml", self.styles_xml()),
            ("word/document.xml", self.document_xml(tables)),
        ];
        for (name, xml) in parts {
            zip.start_file(name, options)?;
            zip.write_all(xml.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn write_cell(out: &mut String, width: u32, text: &str, bold: bool, size: Option<u32>) {
    let _ = write!(
        out,
        r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/></w:tcPr>"#
    );
    write_paragraph(out, text, bold, size);
    out.push_str("</w:tc>");
}

fn write_paragraph(out: &mut String, text: &str, bold: bool, size: Option<u32>) {
    out.push_str("<w:p><w:r>");
    if bold || size.is_some() {
        out.push_str("<w:rPr>");
        if bold {
            out.push_str("<w:b/>");
        }
        if let Some(sz) = size {
            let _ = write!(out, r#"<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/>"#);
        }
        out.push_str("</w:rPr>");
    }
    let _ = write!(
        out,
        r#"<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    );
}

fn inches_to_twips(inches: f64) -> u32 {
    (inches * TWIPS_PER_INCH).round().max(0.0) as u32
}

/// Word measures font sizes in half-points.
fn half_points(pt: f64) -> u32 {
    (pt * 2.0).round().max(1.0) as u32
}

//! Catalogs of known printer models and label media geometries.
//!
//! The device session resolves a decoded frame against these through the
//! [`ModelCatalog`] and [`LabelCatalog`] contracts; [`DefaultCatalog`]
//! implements both over the constant tables below. Callers with their own
//! registries implement the traits themselves.

/// Printer series, derived from the model identifier prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Series {
    Ql,
    Pt,
    Td,
    Rj,
}

/// Identity entry for one known printer model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    /// Marketing identifier as reported by the model value space, e.g. "QL-800".
    pub identifier: &'static str,
    pub series: Series,
}

/// Physical shape of a label medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactor {
    /// Fixed-size pre-cut labels.
    DieCut,
    /// Continuous tape, cut to length by the printer.
    Endless,
    /// Round pre-cut labels.
    RoundDieCut,
}

/// Geometry entry for one known label medium.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSpec {
    /// Size identifier, e.g. "62", "29x90", "d24".
    pub identifier: &'static str,
    pub form_factor: FormFactor,
    /// Tape width in millimeters as reported in the status frame.
    pub width_mm: u8,
    /// Label length in millimeters; 0 for endless media.
    pub length_mm: u16,
    /// Printable area in dots (width, height); height 0 for endless media.
    pub dots_printable: (u32, u32),
}

/// Queryable registry of printer models.
pub trait ModelCatalog {
    /// All known models.
    fn models(&self) -> &[ModelSpec];

    fn find(&self, identifier: &str) -> Option<&ModelSpec> {
        self.models().iter().find(|m| m.identifier == identifier)
    }
}

/// Queryable registry of label media geometries.
pub trait LabelCatalog {
    /// All known labels.
    fn labels(&self) -> &[LabelSpec];

    fn find(&self, identifier: &str) -> Option<&LabelSpec> {
        self.labels().iter().find(|l| l.identifier == identifier)
    }

    /// Match media by the (width, length) pair a status frame reports.
    fn find_by_size(&self, width_mm: u8, length_mm: u16) -> Option<&LabelSpec> {
        self.labels()
            .iter()
            .find(|l| l.width_mm == width_mm && l.length_mm == length_mm)
    }
}

/// Built-in catalog over [`MODELS`] and [`LABELS`].
pub struct DefaultCatalog;

impl ModelCatalog for DefaultCatalog {
    fn models(&self) -> &[ModelSpec] {
        MODELS
    }
}

impl LabelCatalog for DefaultCatalog {
    fn labels(&self) -> &[LabelSpec] {
        LABELS
    }
}

const fn model(identifier: &'static str, series: Series) -> ModelSpec {
    ModelSpec { identifier, series }
}

/// Every model the status decoder can name.
pub static MODELS: &[ModelSpec] = &[
    model("QL-500", Series::Ql),
    model("QL-1050", Series::Ql),
    model("QL-650TD", Series::Ql),
    model("PT-9800PCN", Series::Pt),
    model("PT-9700PC", Series::Pt),
    model("PT-H500", Series::Pt),
    model("PT-E500", Series::Pt),
    model("PT-E550W", Series::Pt),
    model("PT-P700", Series::Pt),
    model("PT-P750W", Series::Pt),
    model("PT-P900W", Series::Pt),
    model("PT-P950NW", Series::Pt),
    model("PT-P900", Series::Pt),
    model("QL-560", Series::Ql),
    model("QL-570", Series::Ql),
    model("QL-580N", Series::Ql),
    model("QL-1060N", Series::Ql),
    model("QL-700", Series::Ql),
    model("QL-710W", Series::Ql),
    model("QL-720NW", Series::Ql),
    model("QL-800", Series::Ql),
    model("QL-810W", Series::Ql),
    model("QL-820NWB", Series::Ql),
    model("QL-1100", Series::Ql),
    model("QL-1110NWB", Series::Ql),
    model("QL-1115NWB", Series::Ql),
    model("QL-600", Series::Ql),
    model("TD-4000", Series::Td),
    model("TD-4100N", Series::Td),
    model("TD-2020", Series::Td),
    model("TD-2120N", Series::Td),
    model("TD-2130N", Series::Td),
    model("TD-4410D", Series::Td),
    model("TD-4420DN", Series::Td),
    model("TD-4510D", Series::Td),
    model("TD-4520DN", Series::Td),
    model("TD-4550DNWB", Series::Td),
    model("RJ-4230B", Series::Rj),
    model("RJ-4250WB", Series::Rj),
];

const fn label(
    identifier: &'static str,
    form_factor: FormFactor,
    width_mm: u8,
    length_mm: u16,
    dots_printable: (u32, u32),
) -> LabelSpec {
    LabelSpec {
        identifier,
        form_factor,
        width_mm,
        length_mm,
        dots_printable,
    }
}

/// DK label media for the QL series.
#[rustfmt::skip]
pub static LABELS: &[LabelSpec] = &[
    label("12",      FormFactor::Endless,     12,   0, (106,  0)),
    label("29",      FormFactor::Endless,     29,   0, (306,  0)),
    label("38",      FormFactor::Endless,     38,   0, (413,  0)),
    label("50",      FormFactor::Endless,     50,   0, (554,  0)),
    label("54",      FormFactor::Endless,     54,   0, (590,  0)),
    label("62",      FormFactor::Endless,     62,   0, (696,  0)),
    label("102",     FormFactor::Endless,    102,   0, (1164, 0)),
    label("17x54",   FormFactor::DieCut,      17,  54, (165,  566)),
    label("17x87",   FormFactor::DieCut,      17,  87, (165,  956)),
    label("23x23",   FormFactor::DieCut,      23,  23, (202,  202)),
    label("29x42",   FormFactor::DieCut,      29,  42, (306,  425)),
    label("29x90",   FormFactor::DieCut,      29,  90, (306,  991)),
    label("39x90",   FormFactor::DieCut,      38,  90, (413,  991)),
    label("52x29",   FormFactor::DieCut,      52,  29, (578,  271)),
    label("62x29",   FormFactor::DieCut,      62,  29, (696,  271)),
    label("62x100",  FormFactor::DieCut,      62, 100, (696,  1109)),
    label("102x51",  FormFactor::DieCut,     102,  51, (1164, 526)),
    label("102x152", FormFactor::DieCut,     102, 152, (1164, 1660)),
    label("d12",     FormFactor::RoundDieCut, 12,  12, (94,   94)),
    label("d24",     FormFactor::RoundDieCut, 24,  24, (236,  236)),
    label("d58",     FormFactor::RoundDieCut, 58,  58, (618,  618)),
];

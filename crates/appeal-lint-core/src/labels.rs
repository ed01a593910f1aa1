//! Human-readable labels, keyed by the same stable ids the catalog uses.
//!
//! Matching and scoring never read this module. Reports carry ids; the
//! presentation layer turns them into text with [`display`].

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::advice::Advice;

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the locale as a lowercase tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Which catalog table an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// A violation profile id.
    Violation,
    /// An issue category id.
    Category,
    /// A violation factor id.
    Factor,
    /// An appeal dimension id.
    Dimension,
    /// A dimension option value.
    Option,
    /// An appeal type id.
    AppealType,
    /// An advice rule id. Text may hold one `{}` for the rule's subject.
    Advice,
}

type Entry = (LabelKind, &'static str, &'static str, &'static str);

#[rustfmt::skip]
static ENTRIES: &[Entry] = &[
    (LabelKind::Violation, "parking", "Parking", "Estacionamiento"),
    (LabelKind::Violation, "speeding", "Speeding", "Exceso de velocidad"),
    (LabelKind::Violation, "red_light", "Red light", "Semáforo en rojo"),
    (LabelKind::Violation, "general", "General", "General"),

    (LabelKind::Category, "procedural_error", "Procedural error on the citation", "Error de procedimiento en la multa"),
    (LabelKind::Category, "vehicle_identity", "Vehicle identity dispute", "Disputa sobre la identidad del vehículo"),
    (LabelKind::Category, "officer_uncertainty", "Uncertain officer account", "Relato incierto del agente"),
    (LabelKind::Category, "emergency", "Emergency circumstances", "Circunstancias de emergencia"),
    (LabelKind::Category, "unclear_signage", "Unclear signage", "Señalización poco clara"),
    (LabelKind::Category, "meter_fault", "Faulty meter", "Parquímetro averiado"),
    (LabelKind::Category, "valid_permit", "Valid permit or payment", "Permiso o pago válido"),
    (LabelKind::Category, "loading_activity", "Loading activity", "Carga y descarga"),
    (LabelKind::Category, "time_dispute", "Time dispute", "Disputa de tiempo"),
    (LabelKind::Category, "speed_estimate", "Estimated speed", "Velocidad estimada"),
    (LabelKind::Category, "equipment_calibration", "Equipment calibration", "Calibración del equipo"),
    (LabelKind::Category, "speed_limit_signage", "Speed limit signage", "Señalización del límite de velocidad"),
    (LabelKind::Category, "traffic_flow", "Flow of traffic", "Flujo del tráfico"),
    (LabelKind::Category, "signal_timing", "Signal timing", "Duración del semáforo"),
    (LabelKind::Category, "yield_to_authority", "Yielding to authority", "Ceder el paso a la autoridad"),
    (LabelKind::Category, "camera_evidence", "Camera evidence", "Prueba de cámara"),
    (LabelKind::Category, "obstructed_view", "Obstructed view", "Visibilidad obstruida"),

    (LabelKind::Factor, "signage", "Unclear or missing signage", "Señalización confusa o ausente"),
    (LabelKind::Factor, "meter_broken", "Broken meter", "Parquímetro roto"),
    (LabelKind::Factor, "permit_displayed", "Valid permit displayed", "Permiso válido visible"),
    (LabelKind::Factor, "loading_zone", "Active loading", "Carga en curso"),
    (LabelKind::Factor, "emergency", "Emergency situation", "Situación de emergencia"),
    (LabelKind::Factor, "prior_tickets", "Prior parking tickets", "Multas de estacionamiento previas"),
    (LabelKind::Factor, "blocking_hydrant", "Blocking a hydrant", "Bloqueo de hidrante"),
    (LabelKind::Factor, "expired_meter", "Meter had expired", "Parquímetro vencido"),
    (LabelKind::Factor, "radar_uncalibrated", "Radar not calibrated", "Radar sin calibrar"),
    (LabelKind::Factor, "estimate_only", "Speed only estimated", "Velocidad solo estimada"),
    (LabelKind::Factor, "sign_missing", "Speed limit sign missing", "Falta la señal de límite"),
    (LabelKind::Factor, "dashcam_footage", "Dashcam footage available", "Grabación de cámara del coche"),
    (LabelKind::Factor, "medical_emergency", "Medical emergency", "Emergencia médica"),
    (LabelKind::Factor, "school_zone", "School zone", "Zona escolar"),
    (LabelKind::Factor, "excessive_speed", "Far above the limit", "Muy por encima del límite"),
    (LabelKind::Factor, "yellow_too_short", "Yellow light too short", "Luz amarilla demasiado corta"),
    (LabelKind::Factor, "camera_unclear", "Camera image unclear", "Imagen de cámara poco clara"),
    (LabelKind::Factor, "yielding_emergency", "Yielding to an emergency vehicle", "Ceder el paso a un vehículo de emergencia"),
    (LabelKind::Factor, "wrong_vehicle", "Wrong vehicle identified", "Vehículo equivocado"),
    (LabelKind::Factor, "pedestrian_present", "Pedestrian in the crossing", "Peatón en el cruce"),
    (LabelKind::Factor, "repeat_offense", "Repeat offense", "Reincidencia"),
    (LabelKind::Factor, "procedural_error", "Procedural error", "Error de procedimiento"),
    (LabelKind::Factor, "prior_violations", "Prior violations", "Infracciones previas"),
    (LabelKind::Factor, "admitted_fault", "Fault admitted", "Culpa admitida"),

    (LabelKind::Dimension, "evidence", "Strength of evidence", "Solidez de las pruebas"),
    (LabelKind::Dimension, "timeliness", "Timeliness of the appeal", "Puntualidad del recurso"),
    (LabelKind::Dimension, "prior_record", "Driving record", "Historial de conducción"),
    (LabelKind::Dimension, "witnesses", "Witnesses", "Testigos"),

    (LabelKind::Option, "strong", "Strong", "Sólida"),
    (LabelKind::Option, "moderate", "Moderate", "Moderada"),
    (LabelKind::Option, "none", "None", "Ninguna"),
    (LabelKind::Option, "weak", "Weak", "Débil"),
    (LabelKind::Option, "early", "Filed early", "Presentado con antelación"),
    (LabelKind::Option, "on_time", "Filed on time", "Presentado a tiempo"),
    (LabelKind::Option, "late", "Filed late", "Presentado tarde"),
    (LabelKind::Option, "clean", "Clean", "Limpio"),
    (LabelKind::Option, "not_stated", "Not stated", "No indicado"),
    (LabelKind::Option, "minor", "Minor", "Leve"),
    (LabelKind::Option, "extensive", "Extensive", "Extenso"),
    (LabelKind::Option, "independent", "Independent witness", "Testigo independiente"),
    (LabelKind::Option, "passenger", "Passenger only", "Solo pasajero"),

    (LabelKind::AppealType, "procedural", "Procedural", "Procedimental"),
    (LabelKind::AppealType, "factual", "Factual", "Fáctico"),
    (LabelKind::AppealType, "legal", "Legal", "Jurídico"),
    (LabelKind::AppealType, "comprehensive", "Comprehensive", "Integral"),

    (LabelKind::Advice, "strong_ground", "Strong grounds: {}.", "Motivo sólido: {}."),
    (LabelKind::Advice, "promising_ground", "{} is a promising ground; back it with evidence.", "{} es un motivo prometedor; respáldelo con pruebas."),
    (LabelKind::Advice, "several_grounds", "Several independent grounds support the appeal.", "Varios motivos independientes respaldan el recurso."),
    (LabelKind::Advice, "no_grounds", "The statement does not mention any recognised grounds for appeal.", "La declaración no menciona ningún motivo de recurso reconocido."),
    (LabelKind::Advice, "no_high_impact", "No high-impact grounds found; the appeal rests on mitigating circumstances.", "No hay motivos de alto impacto; el recurso depende de circunstancias atenuantes."),
    (LabelKind::Advice, "single_ground", "Only one ground was identified.", "Solo se identificó un motivo."),
    (LabelKind::Advice, "passing_mention", "{} is only mentioned in passing; add specifics.", "{} solo se menciona de pasada; añada detalles."),
    (LabelKind::Advice, "strong_basis", "Strong basis for appeal. Lead with {} and attach supporting evidence.", "Base sólida para recurrir. Empiece por {} y adjunte pruebas."),
    (LabelKind::Advice, "reasonable_basis", "Reasonable basis for appeal. Document {} to strengthen it.", "Base razonable para recurrir. Documente {} para reforzarla."),
    (LabelKind::Advice, "weak_basis", "Weak basis for appeal. Look for further facts or evidence before filing.", "Base débil para recurrir. Busque más hechos o pruebas antes de presentarlo."),
    (LabelKind::Advice, "describe_more", "No contestable issues found. Describe what happened in more detail, including signage, equipment, and timing.", "No se encontraron puntos impugnables. Describa lo ocurrido con más detalle: señales, equipos y horarios."),
    (LabelKind::Advice, "likely_to_succeed", "Likely to succeed. File the appeal with your supporting evidence.", "Probable éxito. Presente el recurso con sus pruebas."),
    (LabelKind::Advice, "worth_appealing", "Worth appealing. Address the weaknesses listed before filing.", "Merece la pena recurrir. Corrija los puntos débiles antes de presentarlo."),
    (LabelKind::Advice, "unlikely_to_succeed", "Unlikely to succeed as it stands. Consider paying or gathering more evidence.", "Poco probable tal como está. Considere pagar o reunir más pruebas."),
    (LabelKind::Advice, "shorten_sentences", "Break long sentences apart and give each point its own paragraph.", "Divida las frases largas y dedique un párrafo a cada punto."),
    (LabelKind::Advice, "cite_evidence", "Support each claim with specific evidence such as photographs or receipts.", "Respalde cada afirmación con pruebas concretas, como fotos o recibos."),
    (LabelKind::Advice, "avoid_capitals", "Avoid writing in capital letters and keep the tone formal.", "Evite escribir en mayúsculas y mantenga un tono formal."),
    (LabelKind::Advice, "formal_tone", "Keep the tone formal with a greeting and a sign-off.", "Mantenga un tono formal con saludo y despedida."),
    (LabelKind::Advice, "broaden_grounds", "Address more than one kind of ground: procedure, facts, or the law.", "Aborde más de un tipo de motivo: procedimiento, hechos o derecho."),
    (LabelKind::Advice, "stay_on_topic", "Keep the letter focused on {} grounds.", "Centre la carta en motivos de tipo {}."),
    (LabelKind::Advice, "clear_writing", "Clear, well-structured writing.", "Redacción clara y bien estructurada."),
    (LabelKind::Advice, "persuasive_evidence", "Persuasive use of evidence and legal language.", "Uso persuasivo de pruebas y lenguaje jurídico."),
    (LabelKind::Advice, "professional_tone", "Professional, respectful tone.", "Tono profesional y respetuoso."),
    (LabelKind::Advice, "focused_grounds", "Stays focused on the grounds for appeal.", "Se centra en los motivos del recurso."),
];

static INDEX: LazyLock<HashMap<(LabelKind, &'static str), (&'static str, &'static str)>> =
    LazyLock::new(|| {
        ENTRIES
            .iter()
            .map(|&(kind, id, en, es)| ((kind, id), (en, es)))
            .collect()
    });

/// Look up a label. Returns `None` for ids with no entry.
pub fn label(kind: LabelKind, id: &str, locale: Locale) -> Option<&'static str> {
    INDEX.get(&(kind, id)).map(|&(en, es)| match locale {
        Locale::En => en,
        Locale::Es => es,
    })
}

/// Look up a label, falling back to the id with underscores turned into spaces.
pub fn display(kind: LabelKind, id: &str, locale: Locale) -> String {
    label(kind, id, locale).map_or_else(|| id.replace('_', " "), str::to_string)
}

/// Render advice in `locale`, filling in the label of its subject.
pub fn advice(advice: &Advice, locale: Locale) -> String {
    let template = display(LabelKind::Advice, advice.id(), locale);
    match advice.subject() {
        Some((kind, id)) => template.replacen("{}", &display(kind, id, locale), 1),
        None => template,
    }
}

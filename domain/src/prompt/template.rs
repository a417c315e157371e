//! Prompt templates for the two responder stages and aggregation

use crate::core::language::Language;
use crate::lookup::record::{FlightRecord, summarize_records};
use crate::orchestration::entities::Stage;

/// What the responder stages are asked about
#[derive(Debug, Clone, Copy)]
pub enum PromptSubject<'a> {
    /// A free-form question, passed through verbatim
    Question(&'a str),
    /// Records resolved for a flight query
    Flights(&'a [FlightRecord]),
}

impl PromptSubject<'_> {
    pub fn is_flights(&self) -> bool {
        matches!(self, PromptSubject::Flights(_))
    }
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Short description of a stage's framing, shown in status events.
    pub fn focus(stage: Stage, subject: &PromptSubject<'_>) -> &'static str {
        match (stage, subject.is_flights()) {
            (Stage::StyleA, false) => "concise, formal",
            (Stage::StyleB, false) => "verbose, friendly",
            (Stage::StyleA, true) => "list available flights only",
            (Stage::StyleB, true) => "duration and cost for each flight",
            (Stage::Aggregation, _) => "",
        }
    }

    /// Style A: concise and formal, or "list only" for flights.
    pub fn style_a(subject: &PromptSubject<'_>, language: Language) -> String {
        match (subject, language) {
            (PromptSubject::Question(q), Language::English) => format!(
                "Please answer the following question in a short, formal, and concise manner: {}",
                q
            ),
            (PromptSubject::Question(q), Language::Spanish) => format!(
                "Por favor responde la siguiente pregunta de manera corta, formal y concisa: {}",
                q
            ),
            (PromptSubject::Flights(records), Language::English) => format!(
                "List the available flights from the following data. Only list the flights, do not provide extra information.\n{}",
                summarize_records(records)
            ),
            (PromptSubject::Flights(records), Language::Spanish) => format!(
                "Lista los vuelos disponibles de los siguientes datos. Solo lista los vuelos, no proporciones información adicional. Responde en español.\n{}",
                summarize_records(records)
            ),
        }
    }

    /// Style B: verbose and friendly, or "duration and cost" for flights.
    pub fn style_b(subject: &PromptSubject<'_>, language: Language) -> String {
        match (subject, language) {
            (PromptSubject::Question(q), Language::English) => format!(
                "Please answer the following question in a friendly, verbose, and opinionated way, providing more information and your thoughts: {}",
                q
            ),
            (PromptSubject::Question(q), Language::Spanish) => format!(
                "Por favor responde la siguiente pregunta de manera amigable, verbosa y con opiniones, proporcionando más información y tus pensamientos: {}",
                q
            ),
            (PromptSubject::Flights(records), Language::English) => format!(
                "For each flight in the following data, say how long the flight takes and how much it costs.\n{}",
                summarize_records(records)
            ),
            (PromptSubject::Flights(records), Language::Spanish) => format!(
                "Para cada vuelo en los siguientes datos, di cuánto tiempo toma y cuánto cuesta. Responde en español.\n{}",
                summarize_records(records)
            ),
        }
    }

    /// Prompt for merging both stage answers into one.
    pub fn aggregation(
        style_a: &str,
        style_b: &str,
        flights: bool,
        language: Language,
    ) -> String {
        match (flights, language) {
            (false, Language::English) => format!(
                r#"You are an intelligent aggregator. Combine these two responses to the same question into one coherent, well-balanced answer:

Style A response (formal and concise):
{}

Style B response (friendly and verbose):
{}

At the top of your answer, briefly state that style A is short/formal/concise and style B is friendly/verbose/opinionated.

Please create a unified response that:
1. Combines the best of both styles
2. Is well-formatted and easy to read
3. Removes redundancy while keeping all important information from both responses
4. Maintains a balanced tone between formal and friendly"#,
                style_a, style_b
            ),
            (false, Language::Spanish) => format!(
                r#"Eres un agregador inteligente. Combina estas dos respuestas a la misma pregunta en una respuesta coherente y bien equilibrada:

Respuesta estilo A (formal y concisa):
{}

Respuesta estilo B (amigable y verbosa):
{}

Al inicio de tu respuesta, menciona brevemente que el estilo A es corto/formal/conciso y el estilo B es amigable/verboso/con opiniones.

Por favor crea una respuesta unificada que:
1. Combine lo mejor de ambos estilos
2. Esté bien formateada y sea fácil de leer
3. Elimine redundancia manteniendo toda la información importante de ambas respuestas
4. Mantenga un tono equilibrado entre formal y amigable
5. Responda completamente en español"#,
                style_a, style_b
            ),
            (true, Language::English) => format!(
                r#"You are an intelligent aggregator. Combine these two responses about flights into one coherent, well-formatted answer:

Style A response (flight list):
{}

Style B response (duration and cost):
{}

Please create a unified response that:
1. Lists all available flights clearly
2. Includes duration and cost for each flight
3. Uses clean formatting without excessive markdown (avoid ** for emphasis)
4. Removes any redundancy between the two responses
5. Maintains all the important information from both responses
6. Uses simple formatting like "Flight FL101:" instead of "**Flight FL101:**""#,
                style_a, style_b
            ),
            (true, Language::Spanish) => format!(
                r#"Eres un agregador inteligente. Combina estas dos respuestas sobre vuelos en una respuesta coherente y bien formateada:

Respuesta estilo A (lista de vuelos):
{}

Respuesta estilo B (duración y costo):
{}

Por favor crea una respuesta unificada que:
1. Liste todos los vuelos disponibles claramente
2. Incluya duración y costo para cada vuelo
3. Use formato limpio sin markdown excesivo (evita ** para énfasis)
4. Elimine cualquier redundancia entre las dos respuestas
5. Mantenga toda la información importante de ambas respuestas
6. Use formato simple como "Vuelo FL101:" en lugar de "**Vuelo FL101:**"
7. Responde completamente en español"#,
                style_a, style_b
            ),
        }
    }
}

//! Gateways to external runtimes the tutor backend depends on but does not
//! own: the LLM runtime (spec §4.5) and the speech synthesizer (spec §4.6).

pub mod speech_gateway;
pub mod tutor_gateway;

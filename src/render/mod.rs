pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod fonts;
pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod text;

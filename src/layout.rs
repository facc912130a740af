pub(crate) mod fit;
pub(crate) mod logo;
pub(crate) mod plan;
pub(crate) mod text;

pub(crate) mod compute;
pub(crate) mod helpers;
pub(crate) mod params;
pub(crate) mod score;

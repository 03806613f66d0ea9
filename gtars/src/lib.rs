#[cfg(feature = "core")]
#[doc(inline)]
pub use gtars_core as core;

#[cfg(feature = "featureindex")]
#[doc(inline)]
pub use gtars_featureindex as featureindex;

#[cfg(feature = "bbisource")]
#[doc(inline)]
pub use gtars_bbisource as bbisource;

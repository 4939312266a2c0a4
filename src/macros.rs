pub use enclose::*;

#[macro_export]
macro_rules! onany {
    (( $($d_tt:tt)* ) $func:expr, $($source:expr),+ $(,)?) => {
        $crate::onany($crate::macros::enclose!(($( $d_tt )*) $func), ($($crate::Source::from($source),)+))
    };
    ($func:expr, $($source:expr),+ $(,)?) => {
        $crate::onany($func, ($($crate::Source::from($source),)+))
    };
}

#[macro_export]
macro_rules! map {
    ($func:expr, $target:expr, $($source:expr),+ $(,)?) => {
        $crate::map_into($func, &$target, ($($crate::Source::from($source),)+))
    };
}

#[macro_export]
macro_rules! connect {
    ($from:expr, $to:expr $(,)?) => {
        $crate::connect(&$from, &$to)
    };
}

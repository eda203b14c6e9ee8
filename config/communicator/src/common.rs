#[macro_export]
macro_rules! root_println {
    ($comm: expr, $($arg:tt)*) => {
        if $comm.is_root() {
            println!($($arg)*);
        }
    };
}

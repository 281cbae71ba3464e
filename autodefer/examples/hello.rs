use autodefer::{autofree, defer};

fn defer_example() -> i32 {
    autofree!(let i = Box::new(0));
    **i += 1;

    defer! {
        println!("Hello world!!");
    }

    defer! {
        println!("This is executed first");
    }

    **i
}

fn main() {
    #[cfg(feature = "tracing")]
    simple_logger::init().unwrap();

    println!("defer_example returned {}", defer_example());
}

use autodefer::{autofree, defer};

struct MyStruct {
    a: Box<i32>,
    b: Box<i32>,
}

fn create_my_struct(a: i32, b: i32) -> Box<MyStruct> {
    Box::new(MyStruct {
        a: Box::new(a),
        b: Box::new(b),
    })
}

fn destroy_my_struct(s: &MyStruct) {
    println!("destroying s (a = {}, b = {})", s.a, s.b);
}

fn main() {
    #[cfg(feature = "tracing")]
    simple_logger::init().unwrap();

    autofree!(let i = Box::new(0), |i: Box<i32>| println!("freeing i = {}", i));
    **i += 3;

    let s = create_my_struct(1, 2);
    defer! {
        destroy_my_struct(&s);
    }

    println!("i = {}", i);
    println!("s.a = {}, s.b = {}", s.a, s.b);
}

//! Walks through the public surface with the common Q formats and prints the results.
//!
//! Run with `cargo run --example exercise`.

use qfixed::{BigQ18, BigQ36, Fixed, Q4, Q8, Q12, Q16, Q18, fixed_const};

macro_rules! q8 {
    ($($t:tt)*) => {
        fixed_const!(Q8, $($t)*)
    };
}

fn construction() -> Q8 {
    let a4 = Q4::from_f64(1.1);
    let b4 = Q4::from_int(1);
    let a12 = Q12::from_f64(3.3);

    let a8 = Q8::from_f64(-2.3);
    let c8 = q8!(-2, 3);
    let e8 = Q8::from_fixed(a4);
    let g8 = a12.rounded_to::<8>();
    println!("a4 = {a4}, b4 = {b4}, a12 = {a12}");
    println!("a8 = {a8}, c8 = {c8}, a4 as Q8 = {e8}, a12 rounded to Q8 = {g8}");

    let mut x = Q8::from_int(3);
    println!("from_int(3)          = {x}");
    x = q8!(3, 001);
    println!("q8!(3, 001)          = {x} (raw {})", x.raw());
    x = Q8::truncated(3.001);
    println!("truncated(3.001)     = {x} (raw {})", x.raw());
    x.set_rounded_f64(3.3);
    println!("set_rounded_f64(3.3) = {x} (raw {})", x.raw());
    x = Q8::from_scaled::<4>(123);
    println!("from_scaled::<4>(123) = {x}");
    x.set(a4);
    println!("set(a4)              = {x}");
    x.set_rounded(a12);
    println!("set_rounded(a12)     = {x}");
    -x
}

fn arithmetic(mut a8: Q8) {
    let a4 = Q4::from_f64(1.1);
    let a12 = Q12::from_f64(3.3);

    a8 += 3;
    a8 += Q8::from_f64(3.2);
    a8 += a4;
    a8 += a12.rounded_to::<8>();
    a8 = a8 + 2;
    a8 = 3 + a8;
    a8 = a8 + a4;
    println!("after additions      = {a8}");

    a8 -= 4;
    a8 -= a4;
    a8 -= a12.truncated_to::<8>();
    a8 = 3 - a8;
    a8 = a8 - a4;
    println!("after subtractions   = {a8}");

    a8 *= 3;
    a8 *= a4;
    a8 *= a12;
    a8 = a8 * 2;
    a8 = 3 * a8;
    let wide: Q12 = a8.mul_wide(a4);
    let wide_rev: Q12 = a4.mul_wide(a8);
    println!("after products       = {a8}, a8 x a4 = {wide}, a4 x a8 = {wide_rev}");

    let six = Q8::from_int(6);
    println!("6 / 3 (same type)    = {}", six / Q8::from_int(3));

    let mut by_int = Q8::from_int(12);
    by_int /= 3;
    let mut by_q4 = Q8::from_int(5);
    by_q4 /= a4;
    println!("12 /= 3 -> {by_int}, 5 /= a4 -> {by_q4}");

    let five = Q8::from_int(5);
    let widened: Fixed<20> = five.increased_by(a12);
    let kept: Q8 = widened.div_narrow(a12);
    let from_q16: Q8 = Q16::from_int(3).div_narrow(six);
    let narrow: Q4 = five.div_narrow(a4);
    println!("increased_by then divide = {kept}, Q16 / Q8 = {from_q16}, Q8 / Q4 = {narrow}");
}

fn comparisons(a8: Q8) {
    let a4 = Q4::from_f64(1.1);
    let a12 = Q12::from_f64(3.3);

    println!(
        "a8 == 3: {}, a8 == a4: {}, a8 == a12: {}, 3 == a8: {}",
        a8 == 3,
        a8 == a4,
        a8 == a12.rounded_to::<8>(),
        3 == a8
    );
    println!(
        "a8 < 3: {}, a8 < a4: {}, 3 < a8: {}, a8 > 3.2: {}",
        a8 < 3,
        a8 < a4,
        3 < a8,
        a8 > Q8::from_f64(3.2)
    );
    println!("!a8: {}, !Q8::ZERO: {}", !a8, !Q8::ZERO);
}

fn decomposition(mut a8: Q8) {
    println!(
        "{a8:.5}: integer part {}, fractional part {}, 3 decimal places {}, absolute {}",
        a8.integer_part(),
        a8.fractional_part(),
        a8.decimal_fraction_places(3),
        a8.absolute()
    );

    let ad = a8.to_f64();
    a8.set_rounded_f64(ad);
    a8 = Q8::truncated(ad);
    println!("to_f64 = {ad}, back again = {a8}");
}

fn wide_storage() {
    let a18 = Q18::from_f64(0.75);
    let a8 = Q8::from_f64(-2.3);

    let big = BigQ36::from_int(123_567_890);
    let from_q8 = BigQ36::from_fixed(a8);
    let square: BigQ36 = BigQ18::from_fixed(a18).mul_wide(a18);
    println!("BigQ36: {big}, from Q8: {from_q8}, 0.75^2 = {square}");

    match Fixed::<4, i8>::try_from_f64(100.0) {
        Ok(value) => println!("unexpected: {value}"),
        Err(e) => println!("Fixed<4, i8> from 100.0: {e}"),
    }
    match Q8::from_int(1 << 20).checked_mul(Q8::from_int(1 << 4)) {
        Ok(value) => println!("unexpected: {value}"),
        Err(e) => println!("checked_mul: {e}"),
    }
}

fn main() {
    println!("=== construction ===");
    let a8 = construction();

    println!("\n=== arithmetic ===");
    arithmetic(a8);

    println!("\n=== comparisons ===");
    comparisons(a8);

    println!("\n=== decomposition ===");
    decomposition(a8);

    println!("\n=== wide storage ===");
    wide_storage();
}

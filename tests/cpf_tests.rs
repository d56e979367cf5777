// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::cpf;

#[test]
fn accepts_known_valid_cpfs() {
    assert!(cpf::validate("52998224725"));
    assert!(cpf::validate("11144477735"));
    // Both check digits land on the remainder < 2 => 0 branch for this one
    assert!(cpf::validate("12345678909"));
}

#[test]
fn accepts_punctuated_input() {
    assert!(cpf::validate("529.982.247-25"));
    assert!(cpf::validate("529 982 247 25"));
}

#[test]
fn rejects_repdigit_sequences() {
    for d in 0..=9 {
        let s = d.to_string().repeat(11);
        assert!(!cpf::validate(&s), "repdigit '{}' must be invalid", s);
    }
}

#[test]
fn rejects_wrong_length() {
    assert!(!cpf::validate(""));
    assert!(!cpf::validate("123"));
    assert!(!cpf::validate("5299822472"));
    assert!(!cpf::validate("529982247250"));
    assert!(!cpf::validate("abc"));
}

#[test]
fn rejects_corrupted_check_digits() {
    // 52998224725 is valid; any substitute for either check digit is not
    for d in 0..=9 {
        if d != 2 {
            assert!(!cpf::validate(&format!("529982247{}5", d)));
        }
        if d != 5 {
            assert!(!cpf::validate(&format!("5299822472{}", d)));
        }
    }
}

#[test]
fn formats_full_cpf() {
    assert_eq!(cpf::format("12345678901"), "123.456.789-01");
    assert_eq!(cpf::format("529.982.247-25"), "529.982.247-25");
}

#[test]
fn format_leaves_partial_input_bare() {
    assert_eq!(cpf::format(""), "");
    assert_eq!(cpf::format("123"), "123");
    assert_eq!(cpf::format("123.456"), "123456");
}

#[test]
fn format_ignores_digits_past_the_eleventh() {
    assert_eq!(cpf::format("123456789012345"), "123.456.789-01");
}

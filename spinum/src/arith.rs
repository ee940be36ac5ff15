#![allow(clippy::cast_precision_loss)]
use std::ops::{Add, Div, Mul, Sub};

use crate::{ArithError, ArithResult, Number};

macro_rules! infix_impl {
    ($trayt:ident::$op:ident, $checked:ident, $sym:literal) => {
        impl $trayt for Number {
            type Output = ArithResult<Self>;

            #[inline]
            fn $op(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(a), Self::Int(b)) => {
                        a.$checked(b).map(Self::Int).ok_or(ArithError::Overflow {
                            op: $sym,
                            lhs: self,
                            rhs,
                        })
                    }
                    (Self::Int(a), Self::Float(b)) => Ok(Self::Float($trayt::$op(a as f64, b))),
                    (Self::Float(a), Self::Int(b)) => Ok(Self::Float($trayt::$op(a, b as f64))),
                    (Self::Float(a), Self::Float(b)) => Ok(Self::Float($trayt::$op(a, b))),
                }
            }
        }
    };
}

infix_impl!(Add::add, checked_add, '+');
infix_impl!(Sub::sub, checked_sub, '-');
infix_impl!(Mul::mul, checked_mul, '*');

impl Div for Number {
    type Output = ArithResult<Self>;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        if rhs.is_zero() {
            return Err(ArithError::DivisionByZero { lhs: self, rhs });
        }

        let overflow = ArithError::Overflow {
            op: '/',
            lhs: self,
            rhs,
        };

        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                // i64::MIN / -1 is the only failing case once b != 0
                if a.checked_rem(b).ok_or(overflow)? == 0 {
                    a.checked_div(b).map(Self::Int).ok_or(overflow)
                } else {
                    Ok(Self::Float(a as f64 / b as f64))
                }
            }
            (Self::Int(a), Self::Float(b)) => Ok(Self::Float(a as f64 / b)),
            (Self::Float(a), Self::Int(b)) => Ok(Self::Float(a / b as f64)),
            (Self::Float(a), Self::Float(b)) => Ok(Self::Float(a / b)),
        }
    }
}

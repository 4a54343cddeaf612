//! Memory allocation utilities for FFI functions.
//!
//! Everything handed to C is allocated with `malloc` so the host can release
//! it through the matching `powercast_free_*` function.

use crate::types::{ErrorCode, PowercastError};
use core::ffi::c_char;
use libc::{free, malloc};
use std::ptr;

/// Copy a Rust slice to a newly allocated C array.
///
/// # Safety
/// Returns null on allocation failure or if slice is empty.
pub unsafe fn slice_to_c_array<T: Copy>(slice: &[T]) -> *mut T {
    if slice.is_empty() {
        return ptr::null_mut();
    }

    let ptr = malloc(std::mem::size_of_val(slice)) as *mut T;
    if !ptr.is_null() {
        ptr::copy_nonoverlapping(slice.as_ptr(), ptr, slice.len());
    }
    ptr
}

/// Allocate and copy an array, setting error on failure.
///
/// # Safety
/// out_ptr and out_error must be valid pointers.
/// Returns true on success, false on allocation failure.
pub unsafe fn alloc_and_copy_array<T: Copy>(
    items: &[T],
    out_ptr: *mut *mut T,
    out_error: *mut PowercastError,
) -> bool {
    if items.is_empty() {
        *out_ptr = ptr::null_mut();
        return true;
    }

    let ptr = slice_to_c_array(items);
    if ptr.is_null() {
        if !out_error.is_null() {
            (*out_error).set_error(ErrorCode::AllocationError, "Memory allocation failed");
        }
        return false;
    }

    *out_ptr = ptr;
    true
}

/// Allocate and copy a string array.
///
/// # Safety
/// out_array must be a valid pointer.
/// Returns true on success, false on allocation failure.
pub unsafe fn alloc_string_array(strings: &[&str], out_array: *mut *mut *mut c_char) -> bool {
    let n = strings.len();
    if n == 0 {
        *out_array = ptr::null_mut();
        return true;
    }

    let array_ptr = malloc(n * std::mem::size_of::<*mut c_char>()) as *mut *mut c_char;
    if array_ptr.is_null() {
        return false;
    }

    for (i, s) in strings.iter().enumerate() {
        let str_ptr = malloc(s.len() + 1) as *mut c_char;
        if str_ptr.is_null() {
            // Clean up already allocated strings
            for j in 0..i {
                free(*array_ptr.add(j) as *mut core::ffi::c_void);
            }
            free(array_ptr as *mut core::ffi::c_void);
            return false;
        }
        ptr::copy_nonoverlapping(s.as_ptr() as *const c_char, str_ptr, s.len());
        *str_ptr.add(s.len()) = 0; // Null terminator
        *array_ptr.add(i) = str_ptr;
    }

    *out_array = array_ptr;
    true
}

/// Free an array produced by [`alloc_string_array`].
///
/// # Safety
/// `array` must be null or come from `alloc_string_array` with `n` entries.
pub unsafe fn free_string_array(array: *mut *mut c_char, n: usize) {
    if array.is_null() {
        return;
    }
    for i in 0..n {
        free_ptr(*array.add(i) as *mut core::ffi::c_void);
    }
    free(array as *mut core::ffi::c_void);
}

/// Free a C pointer.
///
/// # Safety
/// ptr must be either null or a valid pointer allocated by malloc.
#[inline]
pub unsafe fn free_ptr(ptr: *mut core::ffi::c_void) {
    if !ptr.is_null() {
        free(ptr);
    }
}

/// Macro to free multiple struct fields.
///
/// Usage:
/// ```ignore
/// free_fields!(result, train, test);
/// ```
#[macro_export]
macro_rules! free_fields {
    ($result:expr, $($field:ident),+ $(,)?) => {{
        $(
            if !$result.$field.is_null() {
                $crate::allocation::free_ptr($result.$field as *mut core::ffi::c_void);
                $result.$field = std::ptr::null_mut();
            }
        )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_slice_to_c_array() {
        unsafe {
            let ptr = slice_to_c_array(&[1.0, 2.0, 3.0]);
            assert!(!ptr.is_null());
            assert_eq!(*ptr, 1.0);
            assert_eq!(*ptr.add(2), 3.0);
            free_ptr(ptr as *mut core::ffi::c_void);

            assert!(slice_to_c_array::<f64>(&[]).is_null());
        }
    }

    #[test]
    fn test_alloc_and_copy_empty_sets_null() {
        let mut out: *mut f64 = ptr::NonNull::dangling().as_ptr();
        let mut error = PowercastError::default();
        unsafe {
            assert!(alloc_and_copy_array::<f64>(&[], &mut out, &mut error));
        }
        assert!(out.is_null());
    }

    #[test]
    fn test_string_array_round_trip() {
        let mut out: *mut *mut c_char = ptr::null_mut();
        unsafe {
            assert!(alloc_string_array(&["lr", "ridge"], &mut out));
            assert_eq!(CStr::from_ptr(*out.add(1)).to_str().unwrap(), "ridge");
            free_string_array(out, 2);
        }
    }
}

//! Integration test suite for the O compiler
//!
//! This crate provides integration tests that verify components work
//! together correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use bytecode_system;
    pub use core_types;
    pub use o_cli;
    pub use parser;
}

/// Sample programs shared by the test files
pub mod samples {
    /// Two classes with inheritance, fields, a constructor and a loop
    pub const ACCOUNTS: &str = "\
class Account is
  var balance: Integer := 0
  this(initial: Integer) is
    balance := initial
  end
  method deposit(amount: Integer) Integer is
    balance := balance.Plus(amount)
    return balance
  end
  method isEmpty() Boolean is
    return balance.Equal(0)
  end
end

class Savings extends Account is
  var rate: Real := 0.5
  this(initial: Integer) is
    balance := initial
  end
  method interest() Real is
    return balance.toReal().Mult(rate)
  end
end

class Bank is
  method main() is
    var s: Savings(100)
    var i: Integer := 0
    while i.Less(3) loop
      s.deposit(10)
      i := i.Plus(1)
    end
    if s.isEmpty() then
      print(\"empty\")
    else
      print(s.interest())
    end
  end
end
";
}

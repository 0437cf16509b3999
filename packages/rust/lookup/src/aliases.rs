//! Static answer table for operators, superglobals, types and keywords.
//!
//! Terms that the remote manual lookup handles badly (operators, language
//! keywords) are answered from this table without touching the network.
//! An entry is either a literal answer or a reference to another key.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Root of the English manual as it appears in literal answers.
const M: &str = "http://php.net/manual/en";

/// Marker prefixed to an alias target when it is returned unexpanded.
pub const ALIAS_MARKER: char = '@';

/// A value in the [`AliasTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasEntry {
    /// A ready-to-post answer.
    Literal(String),
    /// Points at another key in the same table.
    AliasRef(String),
}

impl AliasEntry {
    /// The entry as it is stored: literal text, or `@target` for a reference.
    pub fn raw(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::AliasRef(target) => format!("{ALIAS_MARKER}{target}"),
        }
    }
}

/// Read-only mapping from candidate keys to answers.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, AliasEntry>,
}

impl AliasTable {
    /// Build a table from explicit entries. Later duplicates replace earlier ones.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AliasEntry)>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The built-in table, constructed once and shared by every resolver.
    pub fn builtin() -> Arc<AliasTable> {
        static BUILTIN: LazyLock<Arc<AliasTable>> =
            LazyLock::new(|| Arc::new(AliasTable::from_entries(builtin_entries())));
        Arc::clone(&BUILTIN)
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entry for `key`, without following aliases.
    pub fn get(&self, key: &str) -> Option<&AliasEntry> {
        self.entries.get(key)
    }

    /// Resolve `key` to the text that should be posted.
    ///
    /// Aliases are followed exactly one hop: the target's raw value is
    /// returned even when it is itself an alias. A reference to a missing key
    /// comes back as its own raw `@target` string.
    pub fn resolve(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            AliasEntry::Literal(text) => Some(text.clone()),
            AliasEntry::AliasRef(target) => Some(match self.entries.get(target) {
                Some(entry) => entry.raw(),
                None => format!("{ALIAS_MARKER}{target}"),
            }),
        }
    }

    /// Try each candidate in order and return the first resolved answer.
    pub fn resolve_first<S: AsRef<str>>(&self, candidates: &[S]) -> Option<String> {
        candidates.iter().find_map(|c| self.resolve(c.as_ref()))
    }
}

/// The four keys tried for a query, in priority order.
///
/// Exact match first, then superglobal (`$`), plural (`s`) and gerund (`ing`).
pub fn candidates(pattern: &str) -> [String; 4] {
    [
        pattern.to_string(),
        format!("${pattern}"),
        format!("{pattern}s"),
        format!("{pattern}ing"),
    ]
}

fn lit(key: &'static str, text: String) -> (&'static str, AliasEntry) {
    (key, AliasEntry::Literal(text))
}

fn to(key: &'static str, target: &str) -> (&'static str, AliasEntry) {
    (key, AliasEntry::AliasRef(target.to_string()))
}

fn aliases_of(target: &str, keys: &[&'static str]) -> Vec<(&'static str, AliasEntry)> {
    keys.iter().map(|k| to(k, target)).collect()
}

fn builtin_entries() -> Vec<(&'static str, AliasEntry)> {
    let mut entries = vec![
        // operators
        lit("arithmetic", format!(
            "Remember basic arithmetic from school? [Arithmetic operators]({M}/language.operators.arithmetic.php) \
             still work just like they did then."
        )),
        lit("assignment", format!(
            "[Assignment operators]({M}/language.operators.assignment.php) are used to change the value of a variable."
        )),
        lit("bitwise", format!(
            "[Bitwise operators]({M}/language.operators.bitwise.php) allow evaluation and manipulation of specific \
             bits within a value."
        )),
        lit("comparison", format!(
            "[Comparison operators]({M}/language.operators.comparison.php) allow you to compare two values."
        )),
        lit("increment", format!(
            "[Incrementing/decrementing operators]({M}/language.operators.increment.php) adjust the value of an \
             integer variable by 1."
        )),
        lit("logical", format!(
            "[Logical operators]({M}/language.operators.logical.php) are used to create complex boolean expressions."
        )),
        lit("@", format!(
            "`@` is the [error suppression operator]({M}/language.operators.errorcontrol.php). When prepended to an \
             expression in PHP, any error messages that might be generated by that expression will be ignored. Since \
             ignoring errors is usually bad, it should almost never be used."
        )),
        lit(".", format!(
            "`.` is the [string concatenation operator]({M}/language.operators.string.php). It is used to join two \
             string values together."
        )),
        lit("`", format!(
            "`` ` `` is the [execution operator]({M}/language.operators.execution.php). It is identical to the \
             [`shell_exec()`]({M}/function.shell-exec.php) function, which should be preferred for readability reasons."
        )),
        lit("::", format!(
            "`::` is the [scope resolution operator]({M}/language.oop5.paamayim-nekudotayim.php). It is used for \
             accessing class members defined in a different class than the current scope."
        )),
        // superglobals
        lit("$_cookie", format!(
            "The [`$_COOKIE`]({M}/reserved.variables.cookie.php) superglobal variable is an associative array of \
             variables passed to the current script via HTTP Cookies."
        )),
        lit("$_env", format!(
            "The [`$_ENV`]({M}/reserved.variables.environment.php) superglobal variable is an associative array of \
             variables passed to the current script via the environment method."
        )),
        lit("$_files", format!(
            "The [`$_FILES`]({M}/reserved.variables.files.php) superglobal variable is an associative array of items \
             uploaded to the current script via the HTTP POST method."
        )),
        lit("$_get", format!(
            "The [`$_GET`]({M}/reserved.variables.get.php) superglobal variable is an associative array of variables \
             passed to the current script via the URL parameters."
        )),
        lit("$_post", format!(
            "The [`$_POST`]({M}/reserved.variables.post.php) superglobal variable is an associative array of \
             variables passed to the current script via the HTTP POST method when using \
             application/x-www-form-urlencoded or multipart/form-data as the HTTP Content-Type in the request."
        )),
        lit("$_request", format!(
            "The [`$_REQUEST`]({M}/reserved.variables.request.php) superglobal variable is an associative array that \
             by default contains the contents of `$_GET`, `$_POST` and `$_COOKIE`. The presence and order of \
             variables listed in this array is defined according to the PHP `variables_order` configuration \
             directive. As a result, the contents of this variable are dependent on server configuration and it \
             should be avoided for portability reasons."
        )),
        lit("$_server", format!(
            "The [`$_SERVER`]({M}/reserved.variables.server.php) superglobal variable is an associative array \
             containing information such as headers, paths, and script locations."
        )),
        lit("$_session", format!(
            "The [`$_SESSION`]({M}/reserved.variables.session.php) superglobal variable is an associative array \
             containing session variables available to the current script. See the [sessions]({M}/book.session.php) \
             documentation for more information on how this is used."
        )),
        // types
        lit("arrays", format!(
            "An [array]({M}/language.types.array.php) in PHP is actually an ordered map. A map is a type that \
             associates values to keys. This type is optimized for several different uses; it can be treated as an \
             array, list (vector), hash table (an implementation of a map), dictionary, collection, stack, queue, and \
             probably more. As array values can be other arrays, trees and multidimensional arrays are also possible."
        )),
        lit("bools", format!(
            "A [boolean]({M}/language.types.boolean.php) expresses a truth value. It can be either `TRUE` or `FALSE`."
        )),
        lit("ints", format!("An [integer]({M}/language.types.integer.php) is a whole number.")),
        lit("floats", format!(
            "[Floating point]({M}/language.types.float.php) is a data type capable of representing a fractional number."
        )),
        lit("null", format!(
            "The special [`NULL`]({M}/language.types.null.php) value represents a variable with no value."
        )),
        lit("objects", format!(
            "An [object]({M}/language.types.object.php) is an instance of a \
             [class]({M}/language.oop5.basic.php#language.oop5.basic.class)."
        )),
        lit("resources", format!(
            "A [resource]({M}/language.types.resource.php) is a special variable, holding a reference to an external \
             resource."
        )),
        lit("strings", format!(
            "A [string]({M}/language.types.string.php) is series of characters, where a character is the same as a \
             byte."
        )),
        lit("types", format!(
            "PHP does not require (or support) explicit type definition in variable declaration; a variable's type \
             is determined by the context in which the variable is used. However, it is possible to \
             [change or ensure the type]({M}/language.types.type-juggling.php) of a value, and the type of a function \
             or method argument can be [specified]({M}/language.oop5.typehinting.php)."
        )),
        // keywords and general language features
        lit("abstract", format!(
            "[Abstract classes]({M}/language.oop5.abstract.php) may not be instantiated, and any class that contains \
             at least one abstract method must also be abstract. Methods defined as abstract simply declare the \
             method's signature - they cannot define the implementation."
        )),
        lit("autoloading", format!(
            "[Class autoloaders]({M}/language.oop5.autoload.php) enable classes, interfaces and traits to be \
             automatically loaded if they are currently not defined."
        )),
        lit("callables", format!(
            "Callbacks can be denoted by the [callable]({M}/language.types.callable.php) type hint. This special \
             pseudo-type will accept function and method references, as well as anonymous functions."
        )),
        lit("casting", format!(
            "A C-like [casting]({M}/language.types.type-juggling.php#language.types.typecasting) syntax can be use to \
             change or ensure the type of a value in PHP."
        )),
        lit("class", format!(
            "A [class]({M}/language.oop5.basic.php#language.oop5.basic.class) defines the behaviour of an object."
        )),
        lit("clone", format!(
            "An object copy is created by using the [`clone`]({M}/language.oop5.cloning.php) keyword (which calls the \
             object's `__clone()` method if possible)."
        )),
        lit("context", format!("[Stream context options and parameters]({M}/context.php)")),
        lit("const", format!(
            "`const` can be used to define [constants]({M}/language.constants.syntax.php) and \
             [class constants]({M}/language.oop5.constants.php)"
        )),
        lit("errors", format!(
            "PHP will report [errors, warnings and notices]({M}/language.errors.basics.php) for many common coding \
             and runtime problems. PHP 7 changes how most errors are reported by PHP. Instead of reporting errors \
             through the traditional error reporting mechanism used by PHP 5, most errors are now reported by \
             throwing [Error exceptions]({M}/language.errors.php7.php)."
        )),
        lit("exceptions", format!(
            "An [exception]({M}/language.exceptions.php) can be thrown and caught. Code may be surrounded in a `try` \
             block, to facilitate the catching of potential exceptions. Each `try` must have at least one \
             corresponding `catch` or `finally` block."
        )),
        lit("extends", format!(
            "The `extends` keyword is used to define a class that [inherits]({M}/language.oop5.inheritance.php) \
             another class."
        )),
        lit("final", format!(
            "The [`final`]({M}/language.oop5.final.php) keyword can be used to prevent a child class from overriding \
             a method. It can also be used on the class itself, to prevent further inheritance."
        )),
        lit("functions", format!(
            "A [function]({M}/language.functions.php) is a sub-routine that may be called from other parts of the code."
        )),
        lit("generators", format!(
            "[Generators]({M}/language.generators.php) provide an easy way to implement simple iterators without the \
             overhead or complexity of creating a class that implements the `Iterator` interface."
        )),
        lit("hints", format!(
            "[Type hinting]({M}/functions.arguments.php#functions.arguments.type-declaration) can be used to specify \
             the type of a function or method argument."
        )),
        lit("inheritance", format!(
            "In PHP object-oriented programming, [inheritance]({M}/language.oop5.inheritance.php) enables a class to \
             build on the functionality of another class."
        )),
        lit("interfaces", format!(
            "[Interfaces]({M}/language.oop5.interfaces.php) allow you to create code which specifies which methods a \
             class must implement, without having to define how these methods are handled."
        )),
        lit("magic", format!(
            "PHP was designed by wizards and so uses magic extensively. \
             [Magic constants]({M}/language.constants.predefined.php) and [magic methods]({M}/language.oop5.magic.php) \
             are both available."
        )),
        lit("methods", format!(
            "[Methods]({M}/language.oop5.basic.php#language.oop5.basic.properties-methods) are functions defined \
             within a class. They have access to the internal state of the class or instance upon which they are \
             called."
        )),
        lit("namespaces", format!(
            "[Namespaces]({M}/language.namespaces.php) are used to segregate and organise symbols. They can be used \
             to organise and group classes, interfaces, traits, functions and constants and avoid naming collisions."
        )),
        lit("new", "The new keyword is used to create an object instance from a class.".to_string()),
        lit("oop", format!(
            "[Object-oriented programming]({M}/language.oop5.php) (OOP) is a programming paradigm based on the \
             concept of \"objects\", which may contain data, in the form of properties; and code, in the form of \
             methods."
        )),
        lit("operators", format!(
            "An [operator]({M}/language.operators.php) is something that takes one or more values (or expressions, \
             in programming jargon) and yields another value (so that the construction itself becomes an expression)."
        )),
        lit("refs", format!(
            "[References]({M}/language.references.php) in PHP are a means to access the same variable content by \
             different names. They are frequently the cause of difficult-to-find bugs and memory consumption \
             problems, and are almost always best avoided."
        )),
        lit("return", format!(
            "The [`return`]({M}/functions.returning-values.php) keyword is used to pass a value back to the caller \
             from within a function."
        )),
        lit("precedence", format!(
            "The [precedence]({M}/language.operators.precedence.php) of an operator specifies how \"tightly\" it binds \
             two expressions together."
        )),
        lit("properties", format!(
            "[Properties]({M}/language.oop5.properties.php) are variables defined within a class. They can be used to \
             hold state within a class or object."
        )),
        lit("scopes", format!(
            "The [scope]({M}/language.variables.scope.php) of a symbol is the context within which it is defined."
        )),
        lit("static", format!(
            "The `static` keyword can be used to create [static class members]({M}/language.oop5.static.php) and \
             [static variables]({M}/language.variables.scope.php#language.variables.scope.static). In general, you \
             shouldn't be doing either of these!"
        )),
        lit("traits", format!(
            "[Traits]({M}/language.oop5.traits.php) are a mechanism for code reuse in single inheritance languages \
             such as PHP. A Trait is similar to a class, but only intended to group functionality in a fine-grained \
             and consistent way. It is not possible to instantiate a Trait on its own."
        )),
        lit("tags", format!(
            "When PHP parses a file, it looks for opening and closing [tags]({M}/language.basic-syntax.phptags.php), \
             which are `<?php` and `?>`. These tell PHP to start and stop interpreting the code between them."
        )),
        lit("vars", format!(
            "[Variables]({M}/language.variables.php) in PHP are represented by a dollar sign `$` followed by the name \
             of the variable. Variable names are case-sensitive."
        )),
        lit("use", format!(
            "The `use` keyword is used to [import symbols from another namespace]({M}/language.namespaces.importing.php) \
             and to import a [trait]({M}/language.oop5.traits.php) into a class."
        )),
        lit("visibility", format!(
            "Class members have a [visibility]({M}/language.oop5.visibility.php) modifier, enabling control over the \
             scopes from which they may be accessed."
        )),
        lit("yield", format!(
            "The `yield` keyword is used to emit a value from a [generator]({M}/language.generators.php)."
        )),
        // jokes
        lit("global", "Global ---All--- None Of The Things!".to_string()),
        lit("javascript", "I think you're in the [wrong room](http://chat.stackoverflow.com/rooms/17/javascript).".to_string()),
        // spelling variants and synonyms
        to("$globals", "global"),
        to("booleans", "bools"),
        to("callbacks", "callables"),
        to("casts", "casting"),
        to("classes", "class"),
        to("decls", "hints"),
        to("declaration", "hints"),
        to("implements", "interfaces"),
        to("integers", "ints"),
        to("private", "visibility"),
        to("propertys", "properties"),
        to("protected", "visibility"),
        to("public", "visibility"),
        to("references", "refs"),
        to("type decls", "hints"),
        to("type declaration", "hints"),
        to("variables", "vars"),
        to("yeild", "yield"),
    ];

    entries.extend(aliases_of("arithmetic", &["-", "+", "*", "/", "%", "**"]));
    entries.extend(aliases_of(
        "assignment",
        &[
            "=", "+=", "-=", "*=", "/=", "%=", ".=", "&=", "|=", "^=", "<<=", ">>=", "**=", "??=",
        ],
    ));
    entries.extend(aliases_of("bitwise", &["&", "|", "^", "<<", ">>"]));
    entries.extend(aliases_of(
        "comparison",
        &["==", "===", "!=", "!==", "<", ">", "<=", ">=", "<=>", "??", "<>"],
    ));
    entries.extend(aliases_of("increment", &["++", "--"]));
    entries.extend(aliases_of("logical", &["and", "or", "xor", "&&", "||"]));

    entries
}
